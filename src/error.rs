//! Error types for the follower.

use thiserror::Error;

/// Boxed error raised by a pluggable collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the follower.
#[derive(Error, Debug)]
pub enum FollowError {
    #[error("Command channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Frame source error: {0}")]
    Frame(#[source] BoxError),

    #[error("Target source error: {0}")]
    Detector(#[source] BoxError),

    #[error("Tracker error: {0}")]
    Tracker(#[source] BoxError),
}

/// Command channel errors
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to send command {id}: {source}")]
    Send {
        id: u64,
        #[source]
        source: BoxError,
    },

    #[error("Failed to close channel: {0}")]
    Close(#[source] BoxError),

    #[error("Channel is closed")]
    Closed,

    #[error("Malformed command: {0:?}")]
    Malformed(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration value: {field} - {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
