use anyhow::Result;
use colored::Colorize;

use supportchat_client::{ChatBackend, ChatClient, ChatView, SessionStore};

use crate::cli::Commands;

use super::repl::run_repl_mode;

/// Execute one subcommand against an already constructed client.
pub async fn run_command<B, S, V>(
    client: &mut ChatClient<B, S, V>,
    command: &Commands,
    base_url: &str,
) -> Result<()>
where
    B: ChatBackend,
    S: SessionStore,
    V: ChatView,
{
    match command {
        Commands::Chat => run_repl_mode(client, base_url).await?,
        Commands::Send { message } => {
            if message.trim().is_empty() {
                eprintln!("{}", "Nothing to send.".bright_yellow());
            } else {
                client.send_message(message).await;
            }
        }
        Commands::History => client.load_history().await,
        Commands::Clear { .. } => client.clear_history().await,
        Commands::Reset { .. } => {
            let before = client.session_id().clone();
            client.reset_session().await;
            if client.session_id() != &before {
                println!("{}", format!("New session: {}", client.session_id()).bright_black());
            }
        }
        Commands::Session => println!("{}", client.session_id()),
    }
    Ok(())
}

/// Whether a subcommand was told to skip its confirmation prompt
pub fn skips_confirmation(command: Option<&Commands>) -> bool {
    matches!(
        command,
        Some(Commands::Clear { yes: true }) | Some(Commands::Reset { yes: true })
    )
}
