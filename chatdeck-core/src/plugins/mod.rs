//! Plugin system for chatdeck
//!
//! - [`PluginRegistry`]: Owns plugin instances, their manifests and lifecycle hooks
//! - [`PluginController`]: Enable/disable state machine, summary and command forwarding
//! - [`PluginHostError`]: Error types for plugin registration
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use chatdeck_core::config::{EnabledFlags, UiConfig};
//! use chatdeck_core::events::MemoryEventBus;
//! use chatdeck_core::plugins::{PluginController, PluginRegistry};
//!
//! let registry = PluginRegistry::new();
//! let bus = Arc::new(MemoryEventBus::new(64));
//! let mut controller = PluginController::new(registry, bus, &UiConfig::default());
//!
//! controller.setup(&EnabledFlags::new());
//! controller.toggle("audio_input");
//! assert!(!controller.is_enabled("audio_input"));
//! ```

mod controller;
mod error;
mod registry;

pub use controller::PluginController;
pub use error::PluginHostError;
pub use registry::PluginRegistry;
