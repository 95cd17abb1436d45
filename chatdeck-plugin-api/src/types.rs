//! Plugin types and metadata structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Capability tag attached to a plugin (e.g. `audio.input`).
///
/// Tags are free-form strings. The two audio tags are well known because the
/// chat window shows extra controls while a plugin carrying them is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginType(String);

impl PluginType {
    pub const AUDIO_INPUT: &'static str = "audio.input";
    pub const AUDIO_OUTPUT: &'static str = "audio.output";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn audio_input() -> Self {
        Self::new(Self::AUDIO_INPUT)
    }

    pub fn audio_output() -> Self {
        Self::new(Self::AUDIO_OUTPUT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for either of the audio tags
    pub fn is_audio(&self) -> bool {
        self.0 == Self::AUDIO_INPUT || self.0 == Self::AUDIO_OUTPUT
    }
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PluginType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl PartialEq<str> for PluginType {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Plugin manifest containing metadata about the plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Stable identifier, used as the config key and menu key
    pub id: String,
    /// Display name shown in the plugins menu and the chat summary
    pub name: String,
    /// Plugin version (semver)
    pub version: String,
    /// API version this plugin was built against
    pub api_version: u32,
    /// Human-readable description
    pub description: String,
    /// Capability tags
    #[serde(default)]
    pub types: Vec<PluginType>,
    /// Settings exposed in the plugin settings dialog
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

impl PluginManifest {
    /// Whether the plugin has a tab in the settings dialog
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

impl Default for PluginManifest {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            version: "0.0.1".to_string(),
            api_version: crate::API_VERSION,
            description: String::new(),
            types: Vec::new(),
            options: Vec::new(),
        }
    }
}

/// Specification for a single plugin setting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Option key
    pub key: String,
    /// Label shown in the settings dialog
    pub label: String,
    /// Widget kind
    pub kind: OptionKind,
    /// Default value
    #[serde(default)]
    pub default: serde_json::Value,
}

/// Settings widget kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    #[default]
    Text,
    Bool,
    Int,
    Float,
    Textarea,
}
