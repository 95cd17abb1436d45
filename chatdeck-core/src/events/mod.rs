//! Event system for chatdeck

mod bus;
mod memory;
pub mod types;

pub use bus::{EventBus, EventSeq};
pub use memory::{DEFAULT_HISTORY_LIMIT, MemoryEventBus};
pub use types::{ContextRef, Envelope, PluginEvent};
