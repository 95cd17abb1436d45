pub mod cmd;
pub mod plugin;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use chatdeck_core::{
    ChatdeckConfig, ConfigLoader, MemoryEventBus, PluginController, PluginPanel, UiNotice,
};
use tokio::sync::broadcast;

use crate::builtin;

/// A controller wired to the built-in plugins and the on-disk config
pub struct Session {
    pub controller: PluginController,
    pub bus: Arc<MemoryEventBus>,
    pub panel: PluginPanel,
    notices: broadcast::Receiver<UiNotice>,
    /// File that receives the updated flags
    save_path: PathBuf,
}

impl Session {
    /// Load config and replay persisted flags.
    ///
    /// With `config_path` only that file is read and written; otherwise the
    /// layered user + project config is read and the winning layer is written.
    pub fn open(config_path: Option<&Path>) -> Result<Self> {
        let (config, save_path) = match config_path {
            Some(path) => (ConfigLoader::load_from(path)?, path.to_path_buf()),
            None => (ConfigLoader::load()?, ConfigLoader::save_path()),
        };
        Ok(Self::with_config(&config, save_path))
    }

    pub fn with_config(config: &ChatdeckConfig, save_path: PathBuf) -> Self {
        let bus = Arc::new(MemoryEventBus::new(config.ui.notice_capacity));
        let mut controller = PluginController::new(builtin::registry(), bus.clone(), &config.ui);
        let notices = controller.subscribe_ui();

        controller.setup(&config.plugins_enabled);

        let mut session = Self {
            controller,
            bus,
            panel: PluginPanel::new(),
            notices,
            save_path,
        };
        session.sync();
        session
    }

    /// Apply pending UI notices to the panel
    pub fn sync(&mut self) {
        let applied = self.panel.sync(&mut self.notices);
        tracing::trace!(applied, "Panel synced");
    }

    /// Write current plugin flags back, keeping entries for unknown plugins
    pub fn save(&self) -> Result<()> {
        let mut config = ConfigLoader::load_from(&self.save_path)?;
        config.plugins_enabled.merge(self.controller.enabled_flags());
        ConfigLoader::save_to(&config, &self.save_path)?;
        tracing::debug!(path = %self.save_path.display(), "Plugin flags saved");
        Ok(())
    }

    pub fn print_summary(&self) {
        let summary = self.panel.summary();
        if summary.count == 0 {
            println!("No plugins enabled");
        } else {
            println!("{}    {}", summary.text, summary.tooltip);
        }
    }
}
