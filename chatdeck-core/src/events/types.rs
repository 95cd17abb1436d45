//! Event type definitions

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::commands::Command;

/// Events published by the plugin controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PluginEvent {
    /// A plugin was switched on
    #[serde(rename = "enable")]
    Enable { value: String },

    /// A plugin was switched off
    #[serde(rename = "disable")]
    Disable { value: String },

    /// A batch of commands extracted from a model response
    #[serde(rename = "cmd.execute")]
    CmdExecute { commands: Vec<Command> },
}

impl PluginEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            Self::Enable { .. } => "enable",
            Self::Disable { .. } => "disable",
            Self::CmdExecute { .. } => "cmd.execute",
        }
    }

    /// Plugin id for enable/disable events
    pub fn plugin_id(&self) -> Option<&str> {
        match self {
            Self::Enable { value } | Self::Disable { value } => Some(value),
            Self::CmdExecute { .. } => None,
        }
    }
}

/// Opaque handle to the conversation item an event belongs to.
///
/// The controller never looks inside; subscribers that know the concrete
/// type can downcast. Two handles are equal when they point at the same item.
#[derive(Clone)]
pub struct ContextRef(Arc<dyn Any + Send + Sync>);

impl ContextRef {
    pub fn new<T: Any + Send + Sync>(item: T) -> Self {
        Self(Arc::new(item))
    }

    pub fn from_arc(item: Arc<dyn Any + Send + Sync>) -> Self {
        Self(item)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl PartialEq for ContextRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ContextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextRef")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// An event as it travels over the bus
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// UUIDv7, time-ordered
    pub event_id: Uuid,
    pub event: PluginEvent,
    /// Conversation item, passed through unmodified
    pub ctx: Option<ContextRef>,
}

impl Envelope {
    pub fn new(event: PluginEvent) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            event,
            ctx: None,
        }
    }

    pub fn with_ctx(mut self, ctx: Option<ContextRef>) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn name(&self) -> &'static str {
        self.event.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_names() {
        let enable = PluginEvent::Enable {
            value: "audio_input".to_string(),
        };
        let disable = PluginEvent::Disable {
            value: "audio_input".to_string(),
        };
        let cmd = PluginEvent::CmdExecute { commands: vec![] };

        assert_eq!(enable.name(), "enable");
        assert_eq!(disable.name(), "disable");
        assert_eq!(cmd.name(), "cmd.execute");
        assert_eq!(enable.plugin_id(), Some("audio_input"));
        assert_eq!(cmd.plugin_id(), None);
    }

    #[test]
    fn test_event_wire_format() {
        let event = PluginEvent::Enable {
            value: "cmd_web".to_string(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value, json!({"type": "enable", "value": "cmd_web"}));

        let parsed: PluginEvent =
            serde_json::from_value(json!({"type": "cmd.execute", "commands": [{"cmd": "x"}]}))
                .unwrap();
        assert!(matches!(parsed, PluginEvent::CmdExecute { commands } if commands.len() == 1));
    }

    #[test]
    fn test_context_ref_identity_and_downcast() {
        let ctx = ContextRef::new("conversation #1".to_string());
        let same = ctx.clone();
        let other = ContextRef::new("conversation #1".to_string());

        assert_eq!(ctx, same);
        assert_ne!(ctx, other);
        assert_eq!(
            ctx.downcast_ref::<String>().map(String::as_str),
            Some("conversation #1")
        );
        assert!(ctx.downcast_ref::<u32>().is_none());
    }

    #[test]
    fn test_envelope_carries_ctx() {
        let ctx = ContextRef::new(7_u64);
        let envelope = Envelope::new(PluginEvent::CmdExecute { commands: vec![] })
            .with_ctx(Some(ctx.clone()));

        assert_eq!(envelope.name(), "cmd.execute");
        assert_eq!(envelope.ctx, Some(ctx));
        assert_eq!(envelope.event_id.get_version_num(), 7);
    }
}
