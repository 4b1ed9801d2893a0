//! SupportChat terminal application
//!
//! CLI parsing, configuration, the file-backed session store, the terminal
//! view and the REPL on top of `supportchat-client`.

pub mod app;
pub mod cli;
pub mod config;
pub mod storage;
pub mod view;

pub use app::{build_client, run_app, run_command, run_repl_mode};
pub use cli::{Cli, Commands};
pub use config::ClientConfig;
pub use storage::FileSessionStore;
pub use view::TerminalView;
