use thiserror::Error;

/// Failure of a backing store call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request failed with status: {0}")]
    Status(u16),

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("response is missing `{0}`")]
    MissingData(String),

    #[error("failed to parse response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => StoreError::Status(status.as_u16()),
            None if e.is_decode() => StoreError::Decode(e.to_string()),
            None => StoreError::Transport(e.to_string()),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ControllerError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("there are no names to spin")]
    EmptyRoster,

    #[error("the wheel is already spinning")]
    DrawInProgress,

    #[error("another roster update is still running")]
    Busy,
}

impl ControllerError {
    pub fn validation(message: impl Into<String>) -> Self {
        ControllerError::Validation(message.into())
    }

    /// Errors the hosting surface should not report; the trigger is disabled
    /// in those states anyway.
    pub fn is_silent(&self) -> bool {
        matches!(self, ControllerError::EmptyRoster | ControllerError::DrawInProgress)
    }
}
