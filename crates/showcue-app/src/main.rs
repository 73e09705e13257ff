//! showcue binary - composition root.
//!
//! Plays the host's part around the scanner and dispatcher:
//! 1. Load configuration from TOML (merged with defaults)
//! 2. Render and scan documents on every command that reads one
//! 3. Activate controls through the dispatcher, printing each notice

mod cli;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;

use showcue_core::config::SETTING_KEYS;
use showcue_core::ShowcueConfig;
use showcue_dispatch::{ChannelNotifier, Dispatcher, Notice, NoticeLevel};
use showcue_scan::{html, Control, Scanner};

use cli::{CliArgs, Command, ConfigCommand};

type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Render and scan a file: one render pass.
fn scan_file(path: &Path, config: &ShowcueConfig) -> AppResult<Vec<Control>> {
    let source = std::fs::read_to_string(path)?;
    let scanner = Scanner::new(&config.trigger)?;
    let doc = scanner.render(&source);
    let controls: Vec<Control> = doc.controls().into_iter().cloned().collect();
    tracing::debug!(file = %path.display(), controls = controls.len(), "File scanned");
    Ok(controls)
}

fn print_controls(controls: &[Control]) {
    if controls.is_empty() {
        println!("No triggers found.");
        return;
    }
    for (i, control) in controls.iter().enumerate() {
        println!("{:>3}  {:<5}  {}", i + 1, control.kind, control.label);
    }
}

fn format_notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("[ok] {}", notice.message),
        NoticeLevel::Failure => format!("[failed] {}", notice.message),
    }
}

/// Turn a line like `1, 3 4` into zero-based control indices.
///
/// Tokens that are not numbers, or are out of range, are reported back
/// instead of failing the whole line.
fn parse_selection(line: &str, count: usize) -> (Vec<usize>, Vec<String>) {
    let mut picked = Vec::new();
    let mut rejected = Vec::new();
    for token in line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        match token.parse::<usize>() {
            Ok(n) if n >= 1 && n <= count => picked.push(n - 1),
            _ => rejected.push(token.to_string()),
        }
    }
    (picked, rejected)
}

async fn render(config: &ShowcueConfig, file: &Path, output: Option<&Path>) -> AppResult<()> {
    let source = std::fs::read_to_string(file)?;
    let scanner = Scanner::new(&config.trigger)?;
    let doc = scanner.render(&source);
    let out = html::render(&doc, &config.colors);

    match output {
        Some(path) => {
            std::fs::write(path, out)?;
            tracing::info!(path = %path.display(), "HTML written");
        }
        None => print!("{}", out),
    }
    Ok(())
}

async fn list(config: &ShowcueConfig, file: &Path, json: bool) -> AppResult<()> {
    let controls = scan_file(file, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&controls)?);
    } else {
        print_controls(&controls);
    }
    Ok(())
}

async fn fire(
    config: &ShowcueConfig,
    kind: showcue_core::TriggerKind,
    label: &str,
) -> AppResult<()> {
    let (notifier, mut notices) = ChannelNotifier::channel();
    let dispatcher = Dispatcher::new(config, Arc::new(notifier))?;

    let outcome = dispatcher.dispatch(kind, label).await;
    while let Ok(notice) = notices.try_recv() {
        println!("{}", format_notice(&notice));
    }
    match outcome.error() {
        Some(error) => Err(error.clone().into()),
        None => Ok(()),
    }
}

/// Interactive mode: list the file's controls, then activate them by number.
async fn run(config: &ShowcueConfig, file: &Path) -> AppResult<()> {
    let controls = scan_file(file, config)?;

    let (notifier, mut notices) = ChannelNotifier::channel();
    let dispatcher = Dispatcher::new(config, Arc::new(notifier))?;

    let printer = tokio::spawn(async move {
        while let Some(notice) = notices.recv().await {
            println!("{}", format_notice(&notice));
        }
    });

    print_controls(&controls);
    println!("Enter control numbers to trigger, 'r' to reload, 'q' to quit.");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session(&dispatcher, config, file, controls, stdin).await;

    drop(dispatcher);
    let _ = printer.await;
    Ok(())
}

/// Read control numbers from `input` until `q` or end of input.
///
/// Activations run concurrently and report as they finish. `r` re-renders
/// the file; if that fails the previous controls stay in use. Every
/// activation started here has finished when this returns.
async fn session<R>(
    dispatcher: &Dispatcher,
    config: &ShowcueConfig,
    file: &Path,
    mut controls: Vec<Control>,
    input: R,
) where
    R: AsyncBufRead + Unpin,
{
    let mut in_flight = JoinSet::new();
    let mut lines = input.lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read input; stopping");
                break;
            }
        };

        let line = line.trim();
        match line {
            "" => continue,
            "q" | "quit" => break,
            "r" | "reload" => {
                match scan_file(file, config) {
                    Ok(fresh) => {
                        controls = fresh;
                        print_controls(&controls);
                    }
                    Err(e) => {
                        tracing::warn!(file = %file.display(), error = %e, "Reload failed");
                        eprintln!("Reload failed, keeping the previous controls: {}", e);
                    }
                }
                continue;
            }
            _ => {}
        }

        let (picked, rejected) = parse_selection(line, controls.len());
        for token in rejected {
            eprintln!("Ignoring '{}': not a control number", token);
        }
        for index in picked {
            let d = dispatcher.clone();
            let control = controls[index].clone();
            in_flight.spawn(async move { d.activate(&control).await });
        }

        // Reap finished activations so the set does not grow unbounded.
        while in_flight.try_join_next().is_some() {}
    }

    let pending = in_flight.len();
    if pending > 0 {
        tracing::debug!(pending, "Waiting for in-flight triggers");
    }
    while in_flight.join_next().await.is_some() {}
}

/// `config` subcommands. Reads the file itself: a file that does not parse
/// is reported, never replaced with defaults.
fn config_command(path: &Path, action: ConfigCommand) -> AppResult<()> {
    match action {
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Show => {
            let config = ShowcueConfig::load_for_update(path)?;
            for key in SETTING_KEYS {
                println!("{} = {:?}", key, config.get(key)?);
            }
        }
        ConfigCommand::Get { key } => {
            let config = ShowcueConfig::load_for_update(path)?;
            println!("{}", config.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            let mut config = ShowcueConfig::load_for_update(path)?;
            config.set_and_save(&key, &value, path)?;
            println!("{} = {:?}", key, config.get(&key)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = CliArgs::parse();

    // Config (read before tracing so the file's log level applies).
    let config_file = args.resolve_config_path();
    let config = ShowcueConfig::load_or_default(&config_file);

    // Tracing. Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(
                args.resolve_log_filter(&config.general.log_level),
            )
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(path = %config_file.display(), exists = config_file.exists(), "Configuration resolved");

    // Per-invocation endpoint override; never persisted.
    let mut effective = config.clone();
    if let Some(endpoint) = args.resolve_endpoint() {
        tracing::debug!(endpoint = %endpoint, "Endpoint overridden");
        effective.remote.endpoint = endpoint;
    }

    match args.command {
        Command::Render { file, output } => render(&effective, &file, output.as_deref()).await,
        Command::List { file, json } => list(&effective, &file, json).await,
        Command::Fire { kind, label } => fire(&effective, kind, &label).await,
        Command::Run { file } => run(&effective, &file).await,
        Command::Config { action } => config_command(&config_file, action),
    }
}
