//! Presentation-side notices and the plugin panel view model
//!
//! The controller never touches widgets. It emits [`UiNotice`]s on a
//! broadcast channel; a presentation layer (the real window, or
//! [`PluginPanel`] in tests and the CLI) applies them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Chat-window summary of enabled plugins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSummary {
    /// `"+ {count} {suffix}"`, empty when nothing is enabled
    pub text: String,
    /// Enabled plugin names joined by `" + "`
    pub tooltip: String,
    pub count: usize,
}

/// Change notifications emitted by the plugin controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiNotice {
    /// A plugin needs a checkable menu entry
    MenuEntry { id: String, label: String },
    /// The plugin is gone; drop its menu entry
    MenuRemoved { id: String },
    /// Addon elements a plugin declared during UI setup
    AddonsDeclared { id: String, tags: Vec<String> },
    /// Check mark of a plugin menu entry
    MenuChecked { id: String, checked: bool },
    /// Summary label and tooltip next to the chat input
    Summary(PluginSummary),
    /// Show or hide the addon element governed by a type tag
    AddonVisibility { tag: String, visible: bool },
    /// An audio plugin changed state; audio controls must resync
    AudioChanged { id: String },
    /// Token counters must be recomputed
    TokensRefresh,
    /// Settings dialog switched to a plugin tab
    SettingsTab { index: usize },
}

/// View model for the plugins menu, summary label and addon elements
#[derive(Debug, Default)]
pub struct PluginPanel {
    /// Menu entries in creation order: (id, label)
    menu: Vec<(String, String)>,
    checked: HashMap<String, bool>,
    summary: PluginSummary,
    addons: HashMap<String, bool>,
    /// Addon tag -> plugins that declared it
    addon_owners: HashMap<String, Vec<String>>,
    audio_updates: usize,
    token_refreshes: usize,
    settings_tab: Option<usize>,
}

impl PluginPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single notice
    pub fn apply(&mut self, notice: &UiNotice) {
        match notice {
            UiNotice::MenuEntry { id, label } => {
                if !self.menu.iter().any(|(existing, _)| existing == id) {
                    self.menu.push((id.clone(), label.clone()));
                }
            }
            UiNotice::MenuRemoved { id } => {
                self.menu.retain(|(existing, _)| existing != id);
                self.checked.remove(id);
                for owners in self.addon_owners.values_mut() {
                    owners.retain(|owner| owner != id);
                }
                self.addon_owners.retain(|_, owners| !owners.is_empty());
            }
            UiNotice::AddonsDeclared { id, tags } => {
                for tag in tags {
                    let owners = self.addon_owners.entry(tag.clone()).or_default();
                    if !owners.contains(id) {
                        owners.push(id.clone());
                    }
                }
            }
            UiNotice::MenuChecked { id, checked } => {
                self.checked.insert(id.clone(), *checked);
            }
            UiNotice::Summary(summary) => self.summary = summary.clone(),
            UiNotice::AddonVisibility { tag, visible } => {
                self.addons.insert(tag.clone(), *visible);
            }
            UiNotice::AudioChanged { .. } => self.audio_updates += 1,
            UiNotice::TokensRefresh => self.token_refreshes += 1,
            UiNotice::SettingsTab { index } => self.settings_tab = Some(*index),
        }
    }

    /// Drain every pending notice from `rx`. Returns how many were applied.
    ///
    /// A lagged receiver loses the overwritten notices and continues with
    /// the oldest one still buffered.
    pub fn sync(&mut self, rx: &mut broadcast::Receiver<UiNotice>) -> usize {
        let mut applied = 0;
        loop {
            match rx.try_recv() {
                Ok(notice) => {
                    self.apply(&notice);
                    applied += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Plugin panel lagged behind controller");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        applied
    }

    pub fn menu(&self) -> &[(String, String)] {
        &self.menu
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.get(id).copied().unwrap_or(false)
    }

    pub fn summary(&self) -> &PluginSummary {
        &self.summary
    }

    /// Last visibility set for an addon; `None` if never touched
    pub fn addon_visible(&self, tag: &str) -> Option<bool> {
        self.addons.get(tag).copied()
    }

    /// Plugins that declared an addon element for `tag`
    pub fn addon_owners(&self, tag: &str) -> &[String] {
        self.addon_owners.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn audio_updates(&self) -> usize {
        self.audio_updates
    }

    pub fn token_refreshes(&self) -> usize {
        self.token_refreshes
    }

    pub fn settings_tab(&self) -> Option<usize> {
        self.settings_tab
    }
}
