use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod builtin;
mod commands;

#[derive(Parser)]
#[command(name = "chatdeck", about = "Manage chat client plugins")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read and write this config file instead of the user/project layers
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage plugins
    Plugin(commands::plugin::PluginArgs),
    /// Forward a batch of model commands to plugins
    Cmd(commands::cmd::CmdArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Plugin(args) => commands::plugin::run(args, config),
        Commands::Cmd(args) => commands::cmd::run(args, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["chatdeck", "plugin", "list", "--config", "/tmp/c.toml", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(cli.command, Commands::Plugin(_)));
    }

    #[test]
    fn test_cmd_takes_raw_batch() {
        let cli = Cli::parse_from(["chatdeck", "cmd", r#"[{"cmd": "x"}]"#]);
        let Commands::Cmd(args) = cli.command else {
            panic!("expected cmd subcommand");
        };
        assert_eq!(args.batch, r#"[{"cmd": "x"}]"#);
    }
}
