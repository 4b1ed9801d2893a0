use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use supportchat_types::{normalize_base_url, DEFAULT_BASE_URL};

use crate::cli::Cli;

/// Name of the per-user state directory under the home directory
pub const STATE_DIR_NAME: &str = ".supportchat";

/// File inside the state directory that holds persisted client values
pub const SESSION_FILE_NAME: &str = "session.json";

/// Client configuration derived from CLI arguments and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub state_dir: PathBuf,
    pub verbose: bool,
}

impl ClientConfig {
    /// Precedence: CLI flags > SUPPORTCHAT_* env (both via clap) > defaults
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let base_url = cli
            .base_url
            .as_deref()
            .map(normalize_base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let state_dir = match &cli.state_dir {
            Some(dir) => dir.clone(),
            None => default_state_dir()?,
        };

        Ok(Self {
            base_url,
            state_dir,
            verbose: cli.verbose,
        })
    }

    pub fn session_file(&self) -> PathBuf {
        self.state_dir.join(SESSION_FILE_NAME)
    }
}

/// `~/.supportchat`
pub fn default_state_dir() -> Result<PathBuf> {
    let home_dir = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .context("Failed to get home directory")?;

    Ok(PathBuf::from(home_dir).join(STATE_DIR_NAME))
}
