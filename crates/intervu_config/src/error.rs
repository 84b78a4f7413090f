use std::path::PathBuf;

/// Errors raised while resolving the client configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Could not determine a home directory for local storage")]
    NoHomeDirectory,

    #[error("interview.max_turns must be at least 1")]
    ZeroTurns,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
