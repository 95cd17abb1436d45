//! chatdeck-core: plugin state and event plumbing for the chatdeck chat client
//!
//! - **Plugin registry** - [`PluginRegistry`] owns plugin instances and runs their lifecycle hooks
//! - **Plugin controller** - [`PluginController`] enables/disables plugins and keeps the UI in sync
//! - **Event system** - [`EventBus`] trait and [`MemoryEventBus`] for `enable`, `disable` and `cmd.execute`
//! - **Command routing** - [`CommandRouter`] receives batched command items
//! - **Presentation** - [`UiNotice`] stream and the [`PluginPanel`] view model
//! - **Config** - [`ConfigLoader`] for the persisted `plugins_enabled` table
//!
//! # Architecture
//!
//! ```text
//!  config.toml ──► ConfigLoader ──► EnabledFlags
//!                                        │ setup()
//!                                        ▼
//!  menu click ──► PluginController ──► PluginRegistry (activate / deactivate)
//!                   │          │
//!                   │          └──► EventBus ──► subscribers (enable / disable)
//!                   │                  ▲
//!                   │   apply_cmds ──► CommandRouter (cmd.execute)
//!                   ▼
//!              UiNotice ──► PluginPanel / window
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod plugins;
pub mod ui;

// Re-export key types for convenience
pub use commands::{BusCommandRouter, Command, CommandRouter, filter_commands};
pub use config::{ChatdeckConfig, ConfigError, ConfigLoader, EnabledFlags, UiConfig};
pub use error::ChatdeckError;
pub use events::{ContextRef, Envelope, EventBus, EventSeq, MemoryEventBus, PluginEvent};
pub use plugins::{PluginController, PluginHostError, PluginRegistry};
pub use ui::{PluginPanel, PluginSummary, UiNotice};

pub use chatdeck_plugin_api as plugin_api;
