use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Name {
    pub id: String,
    pub value: String,
}

impl Name {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Opaque identifier of a persisted spin list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ListId(pub String);

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListId {
    fn from(value: &str) -> Self {
        ListId(value.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum StoreMode {
    Remote(ListId),
    Ephemeral,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpinOutcome {
    pub index: usize,
    pub name: Name,
    pub drawn_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    RosterChanged(Vec<Name>),
    DrawStarted { index: usize },
    OutcomeRevealed(SpinOutcome),
    /// The roster shrank below the drawn index before the reveal finished.
    OutcomeDiscarded { index: usize },
    OutcomeCleared,
    /// Non-fatal notification for the hosting surface.
    StoreFailed(String),
}
