//! Plugin registry - owns plugin instances, their manifests and lifecycle

use std::panic::AssertUnwindSafe;

use chatdeck_plugin_api::{API_VERSION, Plugin, PluginError, PluginManifest, PluginType, UiSetup};

use super::error::PluginHostError;

/// A registered plugin with its runtime state
struct RegisteredPlugin {
    /// Plugin manifest (metadata), captured at registration
    manifest: PluginManifest,
    /// The plugin instance
    instance: Box<dyn Plugin>,
    /// Addon elements declared during `setup_ui`
    addons: Vec<PluginType>,
}

/// Set of known plugins, in registration order.
///
/// Lookups by unknown id are never errors: queries return `false`/`None`
/// and mutators do nothing.
pub struct PluginRegistry {
    plugins: Vec<RegisteredPlugin>,
    /// Type tags the window knows how to show/hide addons for
    allowed_types: Vec<PluginType>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    /// Create an empty registry recognising the audio tags
    pub fn new() -> Self {
        Self::with_allowed_types(vec![PluginType::audio_input(), PluginType::audio_output()])
    }

    pub fn with_allowed_types(allowed_types: Vec<PluginType>) -> Self {
        Self {
            plugins: Vec::new(),
            allowed_types,
        }
    }

    /// Register a plugin instance.
    ///
    /// The manifest is read once here; later changes inside the plugin are
    /// not observed.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> Result<(), PluginHostError> {
        let manifest = plugin.manifest();

        if manifest.id.is_empty() {
            return Err(PluginHostError::EmptyId);
        }
        if manifest.api_version != API_VERSION {
            return Err(PluginHostError::ApiVersionMismatch {
                expected: API_VERSION,
                found: manifest.api_version,
            });
        }
        if self.is_registered(&manifest.id) {
            return Err(PluginHostError::AlreadyRegistered { id: manifest.id });
        }

        tracing::debug!(plugin = %manifest.id, version = %manifest.version, "Plugin registered");
        self.plugins.push(RegisteredPlugin {
            manifest,
            instance: plugin,
            addons: Vec::new(),
        });
        Ok(())
    }

    /// Plugin ids in registration order
    pub fn ids(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.manifest.id.clone()).collect()
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&PluginManifest> {
        self.find(id).map(|p| &p.manifest)
    }

    /// Manifests in registration order
    pub fn manifests(&self) -> impl Iterator<Item = &PluginManifest> {
        self.plugins.iter().map(|p| &p.manifest)
    }

    pub fn has_options(&self, id: &str) -> bool {
        self.get(id).is_some_and(PluginManifest::has_options)
    }

    /// Recognised type tags, in fixed order
    pub fn allowed_types(&self) -> &[PluginType] {
        &self.allowed_types
    }

    /// Addon elements the plugin declared during UI setup
    pub fn addons(&self, id: &str) -> &[PluginType] {
        self.find(id).map(|p| p.addons.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run the plugin's enable hook
    pub fn activate(&mut self, id: &str) {
        if let Some(plugin) = self.find_mut(id) {
            plugin.instance.on_enable();
        }
    }

    /// Run the plugin's disable hook
    pub fn deactivate(&mut self, id: &str) {
        if let Some(plugin) = self.find_mut(id) {
            plugin.instance.on_disable();
        }
    }

    /// Drop a plugin definition, tearing it down first.
    ///
    /// Returns whether the plugin was registered.
    pub fn unregister(&mut self, id: &str) -> bool {
        let Some(pos) = self.plugins.iter().position(|p| p.manifest.id == id) else {
            return false;
        };
        self.destroy(id);
        self.plugins.remove(pos);
        tracing::debug!(plugin = %id, "Plugin unregistered");
        true
    }

    /// Run the plugin's optional UI setup hook.
    ///
    /// Returns false if the plugin is unknown or the hook failed; failures
    /// are logged and otherwise ignored.
    pub fn setup_ui(&mut self, id: &str) -> bool {
        let Some(plugin) = self.find_mut(id) else {
            return false;
        };
        let mut ui = UiSetup::new(id);
        let ok = call_hook(id, "setup_ui", || plugin.instance.setup_ui(&mut ui));
        if ok {
            plugin.addons = ui.into_addons();
        }
        ok
    }

    /// Run the plugin's optional destroy hook (stops plugin workers).
    ///
    /// Failures are logged and otherwise ignored.
    pub fn destroy(&mut self, id: &str) -> bool {
        let Some(plugin) = self.find_mut(id) else {
            return false;
        };
        call_hook(id, "destroy", || plugin.instance.destroy())
    }

    fn find(&self, id: &str) -> Option<&RegisteredPlugin> {
        self.plugins.iter().find(|p| p.manifest.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut RegisteredPlugin> {
        self.plugins.iter_mut().find(|p| p.manifest.id == id)
    }
}

/// Invoke a plugin hook with panic isolation
fn call_hook<F>(id: &str, hook: &str, f: F) -> bool
where
    F: FnOnce() -> Result<(), PluginError>,
{
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::warn!(plugin = %id, hook, error = %e, "Plugin hook returned error");
            false
        }
        Err(_) => {
            tracing::warn!(plugin = %id, hook, "Plugin hook panicked");
            false
        }
    }
}
