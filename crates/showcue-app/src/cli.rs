//! CLI argument definitions for the showcue binary.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use showcue_core::TriggerKind;
use std::path::PathBuf;

/// showcue - turn inline cue markup in notes into presentation triggers.
#[derive(Parser, Debug)]
#[command(name = "showcue", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Endpoint override for this invocation (not persisted).
    #[arg(short = 'e', long = "endpoint", global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a markdown file to HTML with triggers turned into buttons.
    Render {
        file: PathBuf,
        /// Write HTML here instead of stdout.
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    /// List the controls a file would produce.
    List {
        file: PathBuf,
        /// Print as JSON.
        #[arg(long = "json")]
        json: bool,
    },
    /// Send a single trigger.
    Fire {
        /// Trigger kind: show or slide.
        #[arg(short = 'k', long = "kind", default_value = "slide")]
        kind: TriggerKind,
        label: String,
    },
    /// Interactively activate a file's controls by number.
    Run { file: PathBuf },
    /// Inspect or change persisted settings.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print every setting.
    Show,
    /// Print the config file location.
    Path,
    /// Print one setting.
    Get { key: String },
    /// Change one setting and save immediately.
    Set { key: String, value: String },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > SHOWCUE_CONFIG env var > platform default (~/.showcue/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("SHOWCUE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve an endpoint override.
    ///
    /// Priority: --endpoint flag > SHOWCUE_ENDPOINT env var.
    /// Returns `None` if neither is set (use the config file value).
    pub fn resolve_endpoint(&self) -> Option<String> {
        if let Some(ref e) = self.endpoint {
            return Some(e.clone());
        }
        std::env::var("SHOWCUE_ENDPOINT").ok()
    }

    /// Resolve the log filter.
    ///
    /// Priority: --log-level flag > RUST_LOG env var > config file value.
    pub fn resolve_log_filter(&self, config_level: &str) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        if let Ok(filter) = std::env::var("RUST_LOG") {
            return filter;
        }
        config_level.to_string()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".showcue").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".showcue").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fire_defaults_to_slide() {
        let args = CliArgs::try_parse_from(["showcue", "fire", "Intro"]).unwrap();
        match args.command {
            Command::Fire { kind, label } => {
                assert_eq!(kind, TriggerKind::Slide);
                assert_eq!(label, "Intro");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_fire_show() {
        let args =
            CliArgs::try_parse_from(["showcue", "fire", "--kind", "show", "Sunday Service"])
                .unwrap();
        assert!(matches!(
            args.command,
            Command::Fire {
                kind: TriggerKind::Show,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert!(CliArgs::try_parse_from(["showcue", "fire", "--kind", "deck", "x"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from([
            "showcue",
            "list",
            "plan.md",
            "--config",
            "/tmp/showcue.toml",
            "--endpoint",
            "stage:5505",
        ])
        .unwrap();
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/showcue.toml"));
        assert_eq!(args.resolve_endpoint().as_deref(), Some("stage:5505"));
    }

    #[test]
    fn test_parse_config_set() {
        let args = CliArgs::try_parse_from([
            "showcue",
            "config",
            "set",
            "remote.endpoint",
            "10.0.0.2:5505",
        ])
        .unwrap();
        match args.command {
            Command::Config {
                action: ConfigCommand::Set { key, value },
            } => {
                assert_eq!(key, "remote.endpoint");
                assert_eq!(value, "10.0.0.2:5505");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_log_level_flag_wins() {
        let args =
            CliArgs::try_parse_from(["showcue", "--log-level", "debug", "config", "path"]).unwrap();
        assert_eq!(args.resolve_log_filter("warn"), "debug");
    }
}
