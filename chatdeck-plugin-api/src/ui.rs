//! UiSetup - what a plugin may declare while the window is being built

use crate::types::PluginType;

/// Passed to [`crate::Plugin::setup_ui`].
///
/// Plugins declare the addon elements they contribute to the chat window,
/// keyed by the capability tag whose visibility governs them. The host
/// collects the declarations; it never hands widgets to plugins.
#[derive(Debug)]
pub struct UiSetup {
    plugin_id: String,
    addons: Vec<PluginType>,
}

impl UiSetup {
    pub fn new(plugin_id: impl Into<String>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            addons: Vec::new(),
        }
    }

    /// Id of the plugin being set up
    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    /// Declare an addon element governed by `tag`. Duplicates are ignored.
    pub fn add_addon(&mut self, tag: PluginType) {
        if !self.addons.contains(&tag) {
            self.addons.push(tag);
        }
    }

    pub fn addons(&self) -> &[PluginType] {
        &self.addons
    }

    pub fn into_addons(self) -> Vec<PluginType> {
        self.addons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_addon_dedupes() {
        let mut ui = UiSetup::new("audio_input");
        ui.add_addon(PluginType::audio_input());
        ui.add_addon(PluginType::audio_input());

        assert_eq!(ui.plugin_id(), "audio_input");
        assert_eq!(ui.addons(), &[PluginType::audio_input()]);
    }
}
