use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

pub const ENDPOINT_ENV: &str = "SPINWHEEL_ENDPOINT";
pub const LIST_ID_ENV: &str = "SPINWHEEL_LIST_ID";
pub const REVEAL_MS_ENV: &str = "SPINWHEEL_REVEAL_MS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WheelConfig {
    pub graphql_endpoint: String,
    /// Present selects the GraphQL-backed roster, absent the in-memory one.
    pub list_id: Option<String>,
    pub reveal_duration_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: "http://localhost:4000".to_string(),
            list_id: None,
            reveal_duration_ms: 4000,
            request_timeout_secs: 30,
        }
    }
}

impl WheelConfig {
    /// Defaults, then the user config file, then environment variables.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|e| {
                warn!("Ignoring config file {:?}: {}", path, e);
                Self::default()
            }),
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("spinwheel").join("config.json"))
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config: {}", e))?;
        serde_json::from_str(&raw).map_err(|e| format!("Failed to parse config: {}", e))
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            self.graphql_endpoint = endpoint;
        }
        if let Some(list_id) = lookup(LIST_ID_ENV) {
            self.list_id = non_blank(list_id);
        }
        if let Some(raw) = lookup(REVEAL_MS_ENV) {
            match raw.parse::<u64>() {
                Ok(ms) => self.reveal_duration_ms = ms,
                Err(_) => {
                    warn!("{} must be a number of milliseconds, got {:?}", REVEAL_MS_ENV, raw)
                }
            }
        }
        debug!("Resolved config: {:?}", self);
    }

    pub fn with_list_id(mut self, list_id: Option<String>) -> Self {
        if let Some(id) = list_id.and_then(non_blank) {
            self.list_id = Some(id);
        }
        self
    }

    pub fn reveal_duration(&self) -> Duration {
        Duration::from_millis(self.reveal_duration_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
