//! Error types for the monitor

use thiserror::Error;

/// Workspace-wide error type
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MonitorError {
    pub fn api(msg: impl Into<String>) -> Self {
        MonitorError::Api(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        MonitorError::Network(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        MonitorError::Parse(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        MonitorError::NotFound(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        MonitorError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        MonitorError::Internal(msg.into())
    }
}

/// Result type alias for monitor operations
pub type MonitorResult<T> = Result<T, MonitorError>;
