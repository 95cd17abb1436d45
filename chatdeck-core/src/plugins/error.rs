//! Plugin registry error types

use thiserror::Error;

/// Errors that can occur when registering plugins
#[derive(Error, Debug)]
pub enum PluginHostError {
    /// API version mismatch between chatdeck and plugin
    #[error("API version mismatch: chatdeck expects {expected}, plugin has {found}")]
    ApiVersionMismatch { expected: u32, found: u32 },

    /// A plugin with the same id is already registered
    #[error("Plugin '{id}' is already registered")]
    AlreadyRegistered { id: String },

    /// Manifest carries an empty id
    #[error("Plugin manifest has an empty id")]
    EmptyId,
}
