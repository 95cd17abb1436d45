use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::types::{ChatdeckConfig, RawChatdeckConfig, RawUiConfig, UiConfig};

/// Environment variable overriding the project config directory
pub const PROJECT_CONFIG_DIR_ENV: &str = "CHATDECK_PROJECT_CONFIG_DIR";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<ChatdeckConfig, ConfigError> {
        let mut raw = RawChatdeckConfig::default();

        // Layer 1: User config
        let user_path = Self::user_config_path();
        if user_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&user_path)?);
        }

        // Layer 2: Project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&project_path)?);
        }

        Ok(Self::finalize(raw))
    }

    /// Load a single config file, applying defaults.
    ///
    /// Returns the default config if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<ChatdeckConfig, ConfigError> {
        if !path.exists() {
            return Ok(ChatdeckConfig::default());
        }
        Ok(Self::finalize(Self::read_raw(path)?))
    }

    /// Save config to a TOML file
    pub fn save_to(config: &ChatdeckConfig, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent().filter(|p| !p.exists()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Get the chatdeck config directory.
    ///
    /// Returns `$XDG_CONFIG_HOME/chatdeck` if set, otherwise `~/.config/chatdeck`.
    pub fn config_dir() -> PathBuf {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config).join("chatdeck")
        } else if let Some(home) = dirs::home_dir() {
            home.join(".config/chatdeck")
        } else {
            PathBuf::from(".config/chatdeck")
        }
    }

    /// Get user config path
    pub fn user_config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Get project config path
    /// Can be overridden with CHATDECK_PROJECT_CONFIG_DIR (useful for isolated tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var(PROJECT_CONFIG_DIR_ENV) {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".chatdeck/config.toml")
        }
    }

    /// File that persists changes made on top of [`Self::load`].
    ///
    /// The project layer wins when both exist, so it is the target whenever
    /// it is present; otherwise the user layer is.
    pub fn save_path() -> PathBuf {
        let project_path = Self::project_config_path();
        if project_path.exists() {
            project_path
        } else {
            Self::user_config_path()
        }
    }

    fn read_raw(path: &Path) -> Result<RawChatdeckConfig, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawChatdeckConfig, overlay: RawChatdeckConfig) -> RawChatdeckConfig {
        let mut plugins_enabled = base.plugins_enabled;
        plugins_enabled.merge(overlay.plugins_enabled);

        RawChatdeckConfig {
            plugins_enabled,
            ui: RawUiConfig {
                plugins_suffix: overlay.ui.plugins_suffix.or(base.ui.plugins_suffix),
                notice_capacity: overlay.ui.notice_capacity.or(base.ui.notice_capacity),
            },
        }
    }

    /// Convert raw config to final config with defaults
    fn finalize(raw: RawChatdeckConfig) -> ChatdeckConfig {
        let defaults = UiConfig::default();
        ChatdeckConfig {
            ui: UiConfig {
                plugins_suffix: raw.ui.plugins_suffix.unwrap_or(defaults.plugins_suffix),
                // A zero-capacity broadcast channel panics on creation
                notice_capacity: raw
                    .ui
                    .notice_capacity
                    .filter(|capacity| *capacity > 0)
                    .unwrap_or(defaults.notice_capacity),
            },
            plugins_enabled: raw.plugins_enabled,
        }
    }
}
