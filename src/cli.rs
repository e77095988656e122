use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "qrquest", version, about = "Scan QR codes, earn points, climb the leaderboard")]
pub struct Cli {
    /// Config file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend endpoint, overrides `api.endpoint`
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Image file re-read as camera frames, overrides `scanner.camera_source`
    #[arg(long, value_name = "PATH")]
    pub camera_source: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long)]
    pub no_persist: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the leaderboard and exit
    Leaderboard {
        /// Number of rows to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Forget the stored session
    Logout,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.api.endpoint = endpoint.clone();
        }
        if let Some(source) = &self.camera_source {
            config.scanner.camera_source = Some(source.clone());
        }
    }
}
