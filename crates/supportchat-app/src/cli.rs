use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for supportchat
#[derive(Parser, Debug)]
#[command(name = "supportchat")]
#[command(about = "Terminal client for the customer support chat bot")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the chat backend (e.g., http://127.0.0.1:8000)
    #[arg(long, value_name = "URL", env = "SUPPORTCHAT_BASE_URL")]
    pub base_url: Option<String>,

    /// Directory holding the persisted session id (default: ~/.supportchat)
    #[arg(long, value_name = "DIR", env = "SUPPORTCHAT_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Enable verbose debug output (HTTP calls, absorbed failures)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive chat session (default)
    Chat,
    /// Send a single message and print the reply
    Send {
        /// Message text
        message: String,
    },
    /// Print the stored conversation for the current session
    History,
    /// Delete the server-side history of the current session
    Clear {
        /// Do not ask for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Forget the current session and start a new one
    Reset {
        /// Do not ask for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Print the active session id
    Session,
}
