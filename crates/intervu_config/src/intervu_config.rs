use std::path::PathBuf;
use std::time::Duration;

use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ConfigError, Result};

/// Top-level client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Setters, PartialEq)]
#[setters(into)]
#[serde(default)]
pub struct IntervuConfig {
    pub api: ApiConfig,
    pub interview: InterviewConfig,
    pub storage: StorageConfig,
}

impl IntervuConfig {
    /// Checks cross-field constraints that serde cannot express
    pub fn validate(self) -> Result<Self> {
        if self.interview.max_turns == 0 {
            return Err(ConfigError::ZeroTurns);
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Setters, PartialEq)]
#[setters(into)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every API path is resolved against
    pub base_url: Url,

    /// Seconds to wait for the TCP/TLS handshake
    pub connect_timeout_secs: u64,

    /// Seconds to wait for a complete response
    pub read_timeout_secs: u64,
}

impl ApiConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:8080/").expect("static base url is valid"),
            connect_timeout_secs: 30,
            read_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Setters, PartialEq)]
#[setters(into)]
#[serde(default)]
pub struct InterviewConfig {
    /// Number of answers after which the session ends locally
    pub max_turns: usize,

    /// Optional closing line appended to the transcript view once the last
    /// answer is in. It is never sent to the server.
    #[setters(strip_option)]
    pub conclude_message: Option<String>,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self { max_turns: 4, conclude_message: None }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Setters, PartialEq)]
#[setters(into)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding local storage, cookies and the config file.
    /// Defaults to `~/.intervu`.
    #[setters(strip_option)]
    pub dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolve_dir(&self) -> Result<PathBuf> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => default_dir(),
        }
    }
}

pub(crate) fn default_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".intervu"))
        .ok_or(ConfigError::NoHomeDirectory)
}
