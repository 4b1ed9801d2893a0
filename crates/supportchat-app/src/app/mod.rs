pub mod commands;
pub mod repl;
pub mod setup;

pub use commands::{run_command, skips_confirmation};
pub use repl::run_repl_mode;
pub use setup::{build_client, init_logging, TerminalClient};

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::config::ClientConfig;

/// Entry point shared by the binary: configure, build the client, dispatch.
pub async fn run_app(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let config = ClientConfig::from_cli(&cli)?;
    log::debug!("Using backend {} and state dir {}", config.base_url, config.state_dir.display());

    let mut client = build_client(&config, skips_confirmation(cli.command.as_ref()));
    let command = cli.command.unwrap_or(Commands::Chat);
    run_command(&mut client, &command, &config.base_url).await
}
