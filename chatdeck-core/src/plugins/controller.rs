//! PluginController - enable/disable state machine and command forwarding
//!
//! The controller owns the in-memory enabled map. Every transition goes
//! through [`PluginController::enable`] or [`PluginController::disable`],
//! which tell the registry, publish an event and then resync the
//! presentation layer through [`UiNotice`]s.

use std::collections::HashMap;
use std::sync::Arc;

use chatdeck_plugin_api::{Plugin, PluginType};
use serde_json::Value;
use tokio::sync::broadcast;

use super::error::PluginHostError;
use super::registry::PluginRegistry;
use crate::commands::{BusCommandRouter, CommandRouter, filter_commands};
use crate::config::{EnabledFlags, UiConfig};
use crate::events::{ContextRef, Envelope, EventBus, PluginEvent};
use crate::ui::{PluginSummary, UiNotice};

pub struct PluginController {
    registry: PluginRegistry,
    /// Plugin id -> enabled. A missing key reads as disabled.
    enabled: HashMap<String, bool>,
    bus: Arc<dyn EventBus>,
    commands: Arc<dyn CommandRouter>,
    notices: broadcast::Sender<UiNotice>,
    /// Ids that already have a menu entry, in creation order
    menu: Vec<String>,
    summary: PluginSummary,
    plugins_suffix: String,
    /// Plugin shown in the settings dialog
    current_plugin: Option<String>,
}

impl PluginController {
    /// Create a controller whose commands are routed onto `bus`
    pub fn new(registry: PluginRegistry, bus: Arc<dyn EventBus>, ui: &UiConfig) -> Self {
        let commands: Arc<dyn CommandRouter> = Arc::new(BusCommandRouter::new(bus.clone()));
        let (notices, _) = broadcast::channel(ui.notice_capacity.max(1));
        Self {
            registry,
            enabled: HashMap::new(),
            bus,
            commands,
            notices,
            menu: Vec::new(),
            summary: PluginSummary::default(),
            plugins_suffix: ui.plugins_suffix.clone(),
            current_plugin: None,
        }
    }

    /// Replace the collaborator that receives `cmd.execute` events
    pub fn with_command_router(mut self, commands: Arc<dyn CommandRouter>) -> Self {
        self.commands = commands;
        self
    }

    /// Receive presentation notices from now on
    pub fn subscribe_ui(&self) -> broadcast::Receiver<UiNotice> {
        self.notices.subscribe()
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Register an additional plugin. It starts disabled.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> Result<(), PluginHostError> {
        self.registry.register(plugin)
    }

    // ─── Startup / Shutdown ──────────────────────────────────────────

    /// Build menu entries, run plugin UI setup, replay persisted flags and
    /// sync the menu.
    pub fn setup(&mut self, flags: &EnabledFlags) {
        self.setup_menu();
        self.setup_ui();
        self.load_config(flags);
        self.update();
    }

    /// Emit a menu entry for every plugin that does not have one yet
    pub fn setup_menu(&mut self) {
        let mut created = Vec::new();
        for manifest in self.registry.manifests() {
            if self.menu.contains(&manifest.id) {
                continue;
            }
            let label = if manifest.name.is_empty() {
                manifest.id.clone()
            } else {
                manifest.name.clone()
            };
            created.push((manifest.id.clone(), label));
        }

        for (id, label) in created {
            self.menu.push(id.clone());
            self.notify(UiNotice::MenuEntry { id, label });
        }
    }

    /// Run every plugin's optional UI hook, announce the addons each plugin
    /// declared, then resync addon visibility.
    ///
    /// A plugin whose hook fails is left registered and declares nothing.
    pub fn setup_ui(&mut self) {
        for id in self.registry.ids() {
            if !self.registry.setup_ui(&id) {
                continue;
            }
            let tags: Vec<String> = self
                .registry
                .addons(&id)
                .iter()
                .map(ToString::to_string)
                .collect();
            if !tags.is_empty() {
                self.notify(UiNotice::AddonsDeclared { id, tags });
            }
        }
        self.handle_enabled_types();
    }

    /// Replay persisted flags: every id stored `true` is enabled, in stored order
    pub fn load_config(&mut self, flags: &EnabledFlags) {
        for id in flags.enabled_ids() {
            self.enable(id);
        }
    }

    /// Stop plugin workers. One failing plugin does not stop the others.
    pub fn destroy(&mut self) {
        for id in self.registry.ids() {
            self.registry.destroy(&id);
        }
    }

    // ─── State Transitions ───────────────────────────────────────────

    /// Enable a plugin.
    ///
    /// Unregistered ids are a silent no-op, but the summary and menu are
    /// refreshed either way.
    pub fn enable(&mut self, id: &str) {
        if self.registry.is_registered(id) {
            self.enabled.insert(id.to_string(), true);
            self.registry.activate(id);
            self.publish(PluginEvent::Enable {
                value: id.to_string(),
            });
            tracing::info!(plugin = %id, "Plugin enabled");
            self.reconcile_audio(id);
        } else {
            tracing::debug!(plugin = %id, "Ignoring enable of unregistered plugin");
        }

        self.update_info();
        self.update();
    }

    /// Disable a plugin. Mirror image of [`Self::enable`].
    pub fn disable(&mut self, id: &str) {
        if self.registry.is_registered(id) {
            self.enabled.insert(id.to_string(), false);
            self.registry.deactivate(id);
            self.publish(PluginEvent::Disable {
                value: id.to_string(),
            });
            tracing::info!(plugin = %id, "Plugin disabled");
            self.reconcile_audio(id);
        } else {
            tracing::debug!(plugin = %id, "Ignoring disable of unregistered plugin");
        }

        self.update_info();
        self.update();
    }

    /// True only for registered plugins whose stored flag is true
    pub fn is_enabled(&self, id: &str) -> bool {
        self.registry.is_registered(id) && self.enabled.get(id).copied().unwrap_or(false)
    }

    /// Flip a plugin (menu click), then resync addons and token counters
    pub fn toggle(&mut self, id: &str) {
        if self.registry.is_registered(id) {
            if self.is_enabled(id) {
                self.disable(id);
            } else {
                self.enable(id);
            }
        }

        self.handle_enabled_types();
        self.notify(UiNotice::TokensRefresh);
    }

    /// Drop a plugin definition and forget its enabled flag
    pub fn unregister(&mut self, id: &str) {
        self.registry.unregister(id);
        self.enabled.remove(id);

        if let Some(pos) = self.menu.iter().position(|existing| existing == id) {
            self.menu.remove(pos);
            self.notify(UiNotice::MenuRemoved { id: id.to_string() });
        }
        if self.current_plugin.as_deref() == Some(id) {
            self.current_plugin = None;
        }
    }

    // ─── Type Queries ────────────────────────────────────────────────

    /// Whether a registered plugin carries `tag`
    pub fn has_type(&self, id: &str, tag: &str) -> bool {
        self.registry.get(id).is_some_and(|m| m.has_type(tag))
    }

    /// True iff some registered, enabled plugin carries `tag`
    pub fn is_type_enabled(&self, tag: &str) -> bool {
        self.registry
            .manifests()
            .any(|m| m.has_type(tag) && self.is_enabled(&m.id))
    }

    /// Recompute addon visibility for every recognised tag.
    ///
    /// The `audio.output` addon is only ever hidden here: while an output
    /// plugin is enabled no visibility change is emitted for it, and the
    /// audio controller decides what to show.
    pub fn handle_enabled_types(&self) {
        for tag in self.registry.allowed_types() {
            match tag.as_str() {
                PluginType::AUDIO_INPUT => {
                    self.notify(UiNotice::AddonVisibility {
                        tag: tag.to_string(),
                        visible: self.is_type_enabled(tag.as_str()),
                    });
                }
                PluginType::AUDIO_OUTPUT => {
                    if !self.is_type_enabled(tag.as_str()) {
                        self.notify(UiNotice::AddonVisibility {
                            tag: tag.to_string(),
                            visible: false,
                        });
                    }
                }
                _ => {}
            }
        }
    }

    // ─── Presentation Sync ───────────────────────────────────────────

    /// Sync menu check marks with the enabled map, then addon visibility
    pub fn update(&self) {
        for id in &self.menu {
            let checked = self.enabled.get(id).copied().unwrap_or(false);
            self.notify(UiNotice::MenuChecked {
                id: id.clone(),
                checked,
            });
        }
        self.handle_enabled_types();
    }

    /// Rebuild the chat summary from the registry.
    ///
    /// Always walks the full registry; nothing is cached between calls.
    pub fn update_info(&mut self) -> PluginSummary {
        let names: Vec<&str> = self
            .registry
            .manifests()
            .filter(|m| self.is_enabled(&m.id))
            .map(|m| m.name.as_str())
            .collect();

        let count = names.len();
        let text = if count > 0 {
            format!("+ {} {}", count, self.plugins_suffix)
        } else {
            String::new()
        };
        let summary = PluginSummary {
            text,
            tooltip: names.join(" + "),
            count,
        };

        self.notify(UiNotice::Summary(summary.clone()));
        self.summary = summary.clone();
        summary
    }

    /// Summary computed by the last [`Self::update_info`]
    pub fn summary(&self) -> &PluginSummary {
        &self.summary
    }

    // ─── Settings Navigation ─────────────────────────────────────────

    /// Select the `index`-th plugin that exposes options.
    ///
    /// Returns false (and leaves the selection alone) when out of range.
    pub fn set_by_tab(&mut self, index: usize) -> bool {
        let Some(id) = self
            .registry
            .manifests()
            .filter(|m| m.has_options())
            .nth(index)
            .map(|m| m.id.clone())
        else {
            return false;
        };

        self.current_plugin = Some(id);
        self.notify(UiNotice::SettingsTab { index });
        true
    }

    /// Settings tab index of a plugin, counting only plugins with options
    pub fn tab_index(&self, id: &str) -> Option<usize> {
        self.registry
            .manifests()
            .filter(|m| m.has_options())
            .position(|m| m.id == id)
    }

    pub fn current_plugin(&self) -> Option<&str> {
        self.current_plugin.as_deref()
    }

    // ─── Commands ────────────────────────────────────────────────────

    /// Forward the command items of `batch` as one `cmd.execute` event.
    ///
    /// Items without a `"cmd"` key are dropped. Nothing is sent for an empty
    /// result. Returns the number of commands forwarded.
    pub fn apply_cmds(&self, ctx: Option<ContextRef>, batch: Vec<Value>) -> usize {
        let commands = filter_commands(batch);
        if commands.is_empty() {
            return 0;
        }

        let count = commands.len();
        let envelope = Envelope::new(PluginEvent::CmdExecute { commands }).with_ctx(ctx);
        tracing::debug!(count, "Dispatching cmd.execute");
        self.commands.route(envelope);
        count
    }

    // ─── Persistence ─────────────────────────────────────────────────

    /// Current flags of every registered plugin, in registry order
    pub fn enabled_flags(&self) -> EnabledFlags {
        self.registry
            .manifests()
            .map(|m| (m.id.as_str(), self.is_enabled(&m.id)))
            .collect()
    }

    // ─── Internals ───────────────────────────────────────────────────

    fn publish(&self, event: PluginEvent) {
        self.bus.publish(Envelope::new(event));
    }

    fn notify(&self, notice: UiNotice) {
        // No subscribers is fine: headless hosts never read notices
        let _ = self.notices.send(notice);
    }

    fn reconcile_audio(&self, id: &str) {
        if self.has_type(id, PluginType::AUDIO_INPUT) || self.has_type(id, PluginType::AUDIO_OUTPUT)
        {
            self.notify(UiNotice::AudioChanged { id: id.to_string() });
        }
    }
}
