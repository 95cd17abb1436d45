use serde::{Deserialize, Serialize};

use super::flags::EnabledFlags;

/// Default suffix of the chat summary label (`"+ 2 plugins"`)
pub const DEFAULT_PLUGINS_SUFFIX: &str = "plugins";

/// Default capacity of the UI notice channel
pub const DEFAULT_NOTICE_CAPACITY: usize = 256;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawChatdeckConfig {
    #[serde(default)]
    pub plugins_enabled: EnabledFlags,

    #[serde(default)]
    pub ui: RawUiConfig,
}

/// UI config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawUiConfig {
    pub plugins_suffix: Option<String>,
    pub notice_capacity: Option<usize>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ChatdeckConfig {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub plugins_enabled: EnabledFlags,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Trailing word of the summary label
    pub plugins_suffix: String,

    /// Capacity of the UI notice broadcast channel
    pub notice_capacity: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            plugins_suffix: DEFAULT_PLUGINS_SUFFIX.to_string(),
            notice_capacity: DEFAULT_NOTICE_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ChatdeckConfig::default();
        assert_eq!(config.ui.plugins_suffix, "plugins");
        assert_eq!(config.ui.notice_capacity, 256);
        assert!(config.plugins_enabled.is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ChatdeckConfig::default();
        config.ui.plugins_suffix = "Plugins".to_string();
        config.plugins_enabled.set("audio_input", true);
        config.plugins_enabled.set("cmd_web", false);

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: ChatdeckConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_raw_config_partial_parsing() {
        let toml_str = r#"
[ui]
plugins_suffix = "extensions"

[plugins_enabled]
audio_output = true
audio_input = false
"#;
        let raw: RawChatdeckConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(raw.ui.plugins_suffix.as_deref(), Some("extensions"));
        assert!(raw.ui.notice_capacity.is_none());
        let ids: Vec<_> = raw.plugins_enabled.iter().collect();
        assert_eq!(ids, vec![("audio_output", true), ("audio_input", false)]);
    }

    #[test]
    fn test_raw_config_empty_uses_none() {
        let raw: RawChatdeckConfig = toml::from_str("").unwrap();
        assert!(raw.ui.plugins_suffix.is_none());
        assert!(raw.plugins_enabled.is_empty());
    }
}
