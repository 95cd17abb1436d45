//! Error types for plugin authors

use thiserror::Error;

/// Errors that plugins can return from their lifecycle hooks
#[derive(Error, Debug)]
pub enum PluginError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UI setup failed
    #[error("UI setup failed: {0}")]
    Setup(String),

    /// Custom error with message
    #[error("{0}")]
    Custom(String),
}

impl PluginError {
    /// Create a custom error with a message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a UI setup error
    pub fn setup(message: impl Into<String>) -> Self {
        Self::Setup(message.into())
    }
}
