use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use qrquest::api::{ApiClient, GameApi};
use qrquest::cli::{Cli, Command};
use qrquest::config::Config;
use qrquest::logging::init_tracing;
use qrquest::scanner::{CameraScanner, Decoder};
use qrquest::session::{FileSessionStore, MemorySessionStore, SessionStore};

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(cli) {
        tracing::error!(error = %format!("{err:#}"), "Fatal error");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply_overrides(&mut config);

    match cli.command {
        Some(Command::Logout) => logout(&config, cli.no_persist),
        Some(Command::Leaderboard { limit }) => {
            config.validate()?;
            print_leaderboard(&config, limit)
        }
        None => {
            config.validate()?;
            run_interactive(&config, cli.no_persist)
        }
    }
}

fn session_store(config: &Config, no_persist: bool) -> Box<dyn SessionStore> {
    if no_persist {
        return Box::new(MemorySessionStore::new());
    }
    let path = config
        .session
        .path
        .clone()
        .unwrap_or_else(FileSessionStore::default_path);
    Box::new(FileSessionStore::new(path))
}

fn build_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

fn run_interactive(config: &Config, no_persist: bool) -> anyhow::Result<()> {
    let runtime = build_runtime()?;
    let api: Arc<dyn GameApi> = Arc::new(ApiClient::new(&config.api)?);
    let session = session_store(config, no_persist);
    let scanner: Box<dyn Decoder> = match &config.scanner.camera_source {
        Some(path) => Box::new(CameraScanner::snapshot(path.clone())),
        None => Box::new(CameraScanner::unavailable()),
    };

    tracing::info!(endpoint = %config.api.endpoint, "Starting qrquest");
    let result = qrquest::ui::run(config, api, session, scanner, runtime.handle());
    // An in-flight request must not keep the process alive after quit.
    runtime.shutdown_timeout(Duration::from_millis(500));
    result.context("Terminal UI failed")
}

fn print_leaderboard(config: &Config, limit: usize) -> anyhow::Result<()> {
    let runtime = build_runtime()?;
    let client = ApiClient::new(&config.api)?;
    let entries = runtime.block_on(client.leaderboard())?;

    if entries.is_empty() {
        println!("No players yet.");
        return Ok(());
    }
    for (index, entry) in entries.iter().take(limit).enumerate() {
        println!("{:>3}. {:<32} {:>6}", index + 1, entry.email, entry.points);
    }
    Ok(())
}

fn logout(config: &Config, no_persist: bool) -> anyhow::Result<()> {
    session_store(config, no_persist).clear()?;
    println!("Logged out.");
    Ok(())
}
