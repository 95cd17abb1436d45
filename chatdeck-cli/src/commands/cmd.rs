//! Forward a batch of model commands to the enabled plugins

use std::path::Path;

use anyhow::{Context, Result, bail};
use chatdeck_core::EventBus;
use clap::Args;
use serde_json::Value;

use super::Session;

/// Command batch arguments
#[derive(Args)]
pub struct CmdArgs {
    /// JSON array of command objects, e.g. '[{"cmd": "read_file"}]'
    pub batch: String,
}

/// Run cmd command
pub fn run(args: CmdArgs, config_path: Option<&Path>) -> Result<()> {
    let batch = parse_batch(&args.batch)?;
    let session = Session::open(config_path)?;

    match dispatch(&session, batch)? {
        Some(payload) => println!("{}", payload),
        None => println!("No commands to forward"),
    }
    Ok(())
}

fn parse_batch(raw: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(raw).context("Command batch is not valid JSON")?;
    match value {
        Value::Array(items) => Ok(items),
        other => bail!("Command batch must be a JSON array, got {}", kind(&other)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Publish the batch and return the pretty-printed event, if one was sent
fn dispatch(session: &Session, batch: Vec<Value>) -> Result<Option<String>> {
    let from = session.bus.current_seq();
    let forwarded = session.controller.apply_cmds(None, batch);
    tracing::debug!(forwarded, "Command batch dispatched");

    let Some((_, envelope)) = session.bus.events_from(from).into_iter().last() else {
        return Ok(None);
    };
    let payload = serde_json::to_string_pretty(&envelope.event)?;
    Ok(Some(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatdeck_core::ChatdeckConfig;
    use tempfile::TempDir;

    fn session() -> (TempDir, Session) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let session = Session::with_config(&ChatdeckConfig::default(), path);
        (dir, session)
    }

    #[test]
    fn test_parse_batch_requires_array() {
        assert_eq!(parse_batch(r#"[{"cmd": "x"}]"#).unwrap().len(), 1);

        let err = parse_batch(r#"{"cmd": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("an object"));

        assert!(parse_batch("not json").is_err());
    }

    #[test]
    fn test_dispatch_filters_commands() {
        let (_dir, session) = session();
        let batch = parse_batch(r#"[{"cmd": "read_file"}, {"text": "hi"}]"#).unwrap();

        let payload = dispatch(&session, batch).unwrap().unwrap();
        let value: Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(value["type"], "cmd.execute");
        assert_eq!(value["commands"].as_array().unwrap().len(), 1);
        assert_eq!(value["commands"][0]["cmd"], "read_file");
    }

    #[test]
    fn test_dispatch_without_commands() {
        let (_dir, session) = session();
        let batch = parse_batch(r#"[{"text": "hi"}]"#).unwrap();

        assert!(dispatch(&session, batch).unwrap().is_none());
    }
}
