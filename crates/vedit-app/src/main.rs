//! VEdit - headless timeline editor
//!
//! Opens a session, replays an edit script, optionally runs playback and
//! prints the render snapshot.

mod playback_loop;
mod script;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vedit_core::EditorConfig;
use vedit_timeline::EditorSession;

use crate::script::Script;

/// VEdit - timeline editing engine driver
#[derive(Parser, Debug)]
#[command(name = "vedit")]
#[command(about = "Replay edit scripts against the VEdit timeline engine")]
#[command(version)]
struct Args {
    /// Edit script (JSON) to replay
    script: Option<PathBuf>,

    /// Configuration file (defaults to <config dir>/vedit/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Playback ticks to run after the script
    #[arg(long, default_value = "0")]
    ticks: u32,

    /// Write the render snapshot here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vedit").join("config.json"))
}

fn load_config(explicit: Option<&Path>) -> Result<EditorConfig> {
    if let Some(path) = explicit {
        return EditorConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }
    match default_config_path() {
        Some(path) if path.exists() => {
            info!(path = %path.display(), "using user config");
            EditorConfig::load_from_file(&path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        _ => Ok(EditorConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the snapshot.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(args.config.as_deref())?;
    if args.print_config {
        println!("{}", String::from_utf8_lossy(&config.to_json()?));
        return Ok(());
    }

    info!("VEdit starting...");
    let mut session = EditorSession::new(config.clone());

    if let Some(path) = &args.script {
        let script = Script::load(path)?;
        script::run(&mut session, &script)?;
    }

    if args.ticks > 0 {
        playback_loop::run_playback(
            session.timeline(),
            &config.playback,
            session.duration(),
            args.ticks,
            0.0,
        )
        .await;
    }

    let json = session.export_snapshot().to_json()?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = json.len(), "snapshot written");
        }
        None => println!("{}", String::from_utf8_lossy(&json)),
    }

    session.shutdown();
    Ok(())
}
