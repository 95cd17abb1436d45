//! chatdeck-plugin-api - Plugin API for the chatdeck chat client
//!
//! This crate provides the trait and types needed to write chatdeck plugins.
//! A plugin is an optional feature extension (audio input, audio output,
//! command execution hooks, ...) that the user can switch on and off from the
//! plugins menu.
//!
//! # Example
//!
//! ```
//! use chatdeck_plugin_api::{Plugin, PluginManifest, PluginType};
//!
//! #[derive(Default)]
//! pub struct Whisper;
//!
//! impl Plugin for Whisper {
//!     fn manifest(&self) -> PluginManifest {
//!         PluginManifest {
//!             id: "audio_input".to_string(),
//!             name: "Audio Input (Whisper)".to_string(),
//!             types: vec![PluginType::audio_input()],
//!             ..Default::default()
//!         }
//!     }
//! }
//! ```

pub mod error;
pub mod types;
pub mod ui;

pub use error::PluginError;
pub use types::*;
pub use ui::UiSetup;

/// Current plugin API version. Plugins must match this exactly.
/// Checked by the registry when a plugin is registered.
pub const API_VERSION: u32 = 1;

/// The core plugin trait - implement this to create a chatdeck plugin.
///
/// Only [`Plugin::manifest`] is required. Every lifecycle hook is an optional
/// capability with a no-op default, so a plugin without UI or background
/// workers implements nothing else.
pub trait Plugin: Send {
    /// Return plugin metadata
    fn manifest(&self) -> PluginManifest;

    /// Called when the user switches the plugin on
    fn on_enable(&mut self) {}

    /// Called when the user switches the plugin off
    fn on_disable(&mut self) {}

    /// Called once at startup so the plugin can declare its UI addons.
    fn setup_ui(&mut self, _ui: &mut UiSetup) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called at shutdown or unregistration. Stop workers here.
    fn destroy(&mut self) -> Result<(), PluginError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Bare;

    impl Plugin for Bare {
        fn manifest(&self) -> PluginManifest {
            PluginManifest {
                id: "bare".to_string(),
                ..Default::default()
            }
        }
    }

    #[test]
    fn test_api_version_is_set() {
        assert_eq!(API_VERSION, 1);
    }

    #[test]
    fn test_plugin_trait_is_object_safe() {
        // This compiles only if Plugin is object-safe
        fn _takes_boxed_plugin(_: Box<dyn Plugin>) {}
    }

    #[test]
    fn test_optional_hooks_default_to_noop() {
        let mut plugin = Bare;
        let mut ui = UiSetup::new("bare");

        plugin.on_enable();
        plugin.on_disable();
        assert!(plugin.setup_ui(&mut ui).is_ok());
        assert!(plugin.destroy().is_ok());
        assert!(ui.addons().is_empty());
    }
}
