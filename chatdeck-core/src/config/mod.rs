//! Configuration: persisted plugin flags and UI settings
//!
//! Config is layered like this:
//! 1. User config: `$XDG_CONFIG_HOME/chatdeck/config.toml`
//! 2. Project config: `.chatdeck/config.toml` (takes precedence)
//!
//! ```toml
//! [ui]
//! plugins_suffix = "plugins"
//!
//! [plugins_enabled]
//! audio_input = true
//! cmd_web = false
//! ```

mod error;
mod flags;
mod loader;
mod types;

pub use error::ConfigError;
pub use flags::EnabledFlags;
pub use loader::{ConfigLoader, PROJECT_CONFIG_DIR_ENV};
pub use types::{
    ChatdeckConfig, DEFAULT_NOTICE_CAPACITY, DEFAULT_PLUGINS_SUFFIX, RawChatdeckConfig,
    RawUiConfig, UiConfig,
};
