//! Plugin management commands

use std::path::Path;

use anyhow::{Result, bail};
use clap::{Args, Subcommand};

use super::Session;

/// Plugin management arguments
#[derive(Args)]
pub struct PluginArgs {
    #[command(subcommand)]
    pub command: PluginCommands,
}

/// Plugin subcommands
#[derive(Subcommand)]
pub enum PluginCommands {
    /// List available plugins
    List,
    /// Enable a plugin
    Enable {
        /// Plugin id to enable
        id: String,
    },
    /// Disable a plugin
    Disable {
        /// Plugin id to disable
        id: String,
    },
    /// Flip a plugin on or off
    Toggle {
        /// Plugin id to toggle
        id: String,
    },
    /// Show plugin details
    Info {
        /// Plugin id
        id: String,
    },
}

/// Run plugin command
pub fn run(args: PluginArgs, config_path: Option<&Path>) -> Result<()> {
    let mut session = Session::open(config_path)?;

    match args.command {
        PluginCommands::List => list_plugins(&session),
        PluginCommands::Enable { id } => change(&mut session, &id, Change::Enable),
        PluginCommands::Disable { id } => change(&mut session, &id, Change::Disable),
        PluginCommands::Toggle { id } => change(&mut session, &id, Change::Toggle),
        PluginCommands::Info { id } => show_plugin_info(&session, &id),
    }
}

#[derive(Debug, Clone, Copy)]
enum Change {
    Enable,
    Disable,
    Toggle,
}

fn list_plugins(session: &Session) -> Result<()> {
    let registry = session.controller.registry();

    if registry.is_empty() {
        println!("No plugins available");
        return Ok(());
    }

    for (id, label) in session.panel.menu() {
        let status = if session.panel.is_checked(id) { "✓" } else { "○" };
        let description = registry
            .get(id)
            .map(|m| m.description.as_str())
            .filter(|d| !d.is_empty())
            .unwrap_or("No description");
        println!("{} {:<14} {:<24} {}", status, id, label, description);
    }

    println!();
    session.print_summary();
    Ok(())
}

fn change(session: &mut Session, id: &str, change: Change) -> Result<()> {
    if !session.controller.registry().is_registered(id) {
        bail!("Plugin '{}' not found. Run 'chatdeck plugin list' to see all plugins.", id);
    }

    match change {
        Change::Enable => session.controller.enable(id),
        Change::Disable => session.controller.disable(id),
        Change::Toggle => session.controller.toggle(id),
    }
    session.sync();
    session.save()?;

    let state = if session.controller.is_enabled(id) {
        "Enabled"
    } else {
        "Disabled"
    };
    println!("{} plugin: {}", state, id);
    session.print_summary();
    Ok(())
}

fn show_plugin_info(session: &Session, id: &str) -> Result<()> {
    let Some(m) = session.controller.registry().get(id) else {
        println!("Plugin '{}' not found", id);
        println!();
        println!("Run 'chatdeck plugin list' to see all plugins.");
        return Ok(());
    };

    println!("Id:          {}", m.id);
    println!("Name:        {}", m.name);
    println!("Version:     {}", m.version);
    println!(
        "Description: {}",
        if m.description.is_empty() {
            "No description"
        } else {
            &m.description
        }
    );
    if !m.types.is_empty() {
        let types: Vec<_> = m.types.iter().map(|t| t.as_str()).collect();
        println!("Types:       {}", types.join(", "));
    }
    println!(
        "Status:      {}",
        if session.controller.is_enabled(id) {
            "Enabled"
        } else {
            "Disabled"
        }
    );

    if let Some(tab) = session.controller.tab_index(id) {
        println!();
        println!("Settings (tab {}):", tab);
        for option in &m.options {
            println!("  {:<12} {:<20} default: {}", option.key, option.label, option.default);
        }
    }

    Ok(())
}
