//! Command batching and routing
//!
//! Model responses may carry tool-style command objects. The controller only
//! batches and forwards them; interpretation belongs to whoever subscribes
//! to `cmd.execute`.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::events::{Envelope, EventBus};

/// A single command item: a JSON object with at least a `"cmd"` key
pub type Command = Map<String, Value>;

/// Key every command item must carry
pub const CMD_KEY: &str = "cmd";

/// Keep only the objects that carry a `"cmd"` key, preserving order.
///
/// Non-object items are dropped along with objects lacking the key.
pub fn filter_commands(batch: Vec<Value>) -> Vec<Command> {
    batch
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) if map.contains_key(CMD_KEY) => Some(map),
            _ => None,
        })
        .collect()
}

/// Receives `cmd.execute` envelopes from the controller
pub trait CommandRouter: Send + Sync {
    fn route(&self, envelope: Envelope);
}

/// Default router: puts command envelopes on the shared event bus
pub struct BusCommandRouter {
    bus: Arc<dyn EventBus>,
}

impl BusCommandRouter {
    pub fn new(bus: Arc<dyn EventBus>) -> Self {
        Self { bus }
    }
}

impl CommandRouter for BusCommandRouter {
    fn route(&self, envelope: Envelope) {
        let seq = self.bus.publish(envelope);
        tracing::debug!(seq, "Routed command batch");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{MemoryEventBus, PluginEvent};
    use serde_json::json;

    #[test]
    fn test_filter_keeps_only_cmd_objects_in_order() {
        let batch = vec![
            json!({"cmd": "x"}),
            json!({"foo": 1}),
            json!("cmd"),
            json!({"cmd": "y", "params": {"q": "rust"}}),
        ];

        let commands = filter_commands(batch);

        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0]["cmd"], "x");
        assert_eq!(commands[1]["cmd"], "y");
        assert_eq!(commands[1]["params"]["q"], "rust");
    }

    #[test]
    fn test_filter_empty_and_keyless() {
        assert!(filter_commands(vec![]).is_empty());
        assert!(filter_commands(vec![json!({})]).is_empty());
    }

    #[test]
    fn test_bus_router_publishes() {
        let bus = Arc::new(MemoryEventBus::new(8));
        let router = BusCommandRouter::new(bus.clone());

        router.route(Envelope::new(PluginEvent::CmdExecute {
            commands: filter_commands(vec![json!({"cmd": "x"})]),
        }));

        let events = bus.events_from(0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].1.name(), "cmd.execute");
    }
}
