//! Plugins shipped with the chat client

use chatdeck_core::PluginRegistry;
use chatdeck_plugin_api::{
    OptionKind, OptionSpec, Plugin, PluginError, PluginManifest, PluginType, UiSetup,
};
use serde_json::json;

/// A built-in plugin described entirely by its manifest
struct Builtin {
    manifest: PluginManifest,
}

impl Plugin for Builtin {
    fn manifest(&self) -> PluginManifest {
        self.manifest.clone()
    }

    fn on_enable(&mut self) {
        tracing::debug!(plugin = %self.manifest.id, "Builtin plugin activated");
    }

    fn on_disable(&mut self) {
        tracing::debug!(plugin = %self.manifest.id, "Builtin plugin deactivated");
    }

    fn setup_ui(&mut self, ui: &mut UiSetup) -> Result<(), PluginError> {
        for tag in self.manifest.types.iter().filter(|t| t.is_audio()) {
            tracing::debug!(plugin = %ui.plugin_id(), addon = %tag, "Declaring addon");
            ui.add_addon(tag.clone());
        }
        Ok(())
    }
}

fn option(key: &str, label: &str, kind: OptionKind, default: serde_json::Value) -> OptionSpec {
    OptionSpec {
        key: key.to_string(),
        label: label.to_string(),
        kind,
        default,
    }
}

fn manifests() -> Vec<PluginManifest> {
    vec![
        PluginManifest {
            id: "audio_input".to_string(),
            name: "Audio Input".to_string(),
            description: "Speech recognition for the chat input".to_string(),
            types: vec![PluginType::audio_input()],
            options: vec![
                option("model", "Model", OptionKind::Text, json!("whisper-1")),
                option("timeout", "Timeout", OptionKind::Int, json!(5)),
            ],
            ..Default::default()
        },
        PluginManifest {
            id: "audio_output".to_string(),
            name: "Audio Output".to_string(),
            description: "Reads assistant replies aloud".to_string(),
            types: vec![PluginType::audio_output()],
            options: vec![option("voice", "Voice", OptionKind::Text, json!("alloy"))],
            ..Default::default()
        },
        PluginManifest {
            id: "cmd_files".to_string(),
            name: "Command: Files I/O".to_string(),
            description: "Lets the model read and write files in the workdir".to_string(),
            types: vec![PluginType::new("cmd")],
            options: vec![option(
                "auto_cwd",
                "Auto-append CWD",
                OptionKind::Bool,
                json!(true),
            )],
            ..Default::default()
        },
        PluginManifest {
            id: "cmd_web".to_string(),
            name: "Command: Web Search".to_string(),
            description: "Lets the model search the web".to_string(),
            types: vec![PluginType::new("cmd")],
            ..Default::default()
        },
        PluginManifest {
            id: "real_time".to_string(),
            name: "Real Time".to_string(),
            description: "Appends the current date and time to the system prompt".to_string(),
            ..Default::default()
        },
    ]
}

/// Registry holding every built-in plugin
pub fn registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    for manifest in manifests() {
        let id = manifest.id.clone();
        if let Err(e) = registry.register(Box::new(Builtin { manifest })) {
            tracing::error!(plugin = %id, error = %e, "Failed to register builtin plugin");
        }
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_unique_and_registered() {
        let registry = registry();
        assert_eq!(registry.len(), manifests().len());
        assert_eq!(registry.ids()[0], "audio_input");
    }

    #[test]
    fn test_builtin_audio_plugins_declare_addons() {
        let mut registry = registry();
        assert!(registry.setup_ui("audio_output"));
        assert_eq!(registry.addons("audio_output"), &[PluginType::audio_output()]);
        assert!(registry.setup_ui("cmd_web"));
        assert!(registry.addons("cmd_web").is_empty());
    }
}
