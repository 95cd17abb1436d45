//! Error types for chatdeck-core

use thiserror::Error;

use crate::config::ConfigError;
use crate::plugins::PluginHostError;

/// Top-level error type for chatdeck-core
#[derive(Error, Debug)]
pub enum ChatdeckError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Plugin error: {0}")]
    Plugin(#[from] PluginHostError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chatdeck_error_plugin_displays_correctly() {
        let error = ChatdeckError::Plugin(PluginHostError::EmptyId);
        assert!(error.to_string().contains("Plugin error"));
    }

    #[test]
    fn chatdeck_error_converts_from_config_error() {
        let config_error = ConfigError::Io {
            path: "config.toml".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let error: ChatdeckError = config_error.into();
        assert!(matches!(error, ChatdeckError::Config(_)));
    }

    #[test]
    fn chatdeck_error_converts_from_plugin_error() {
        let error: ChatdeckError = PluginHostError::AlreadyRegistered {
            id: "cmd_web".to_string(),
        }
        .into();
        assert!(matches!(error, ChatdeckError::Plugin(_)));
        assert!(error.to_string().contains("cmd_web"));
    }
}
