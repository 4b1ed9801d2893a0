use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use supportchat_client::{ChatBackend, ChatClient, ChatView, SessionStore};

/// What the REPL should do with one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction<'a> {
    Send(&'a str),
    Clear,
    Reset,
    ShowSession,
    Help,
    Quit,
    Ignore,
}

pub fn parse_line(line: &str) -> ReplAction<'_> {
    let line = line.trim();
    match line {
        "" => ReplAction::Ignore,
        "exit" | "quit" | "/quit" | "/exit" => ReplAction::Quit,
        "/clear" => ReplAction::Clear,
        "/reset" => ReplAction::Reset,
        "/session" => ReplAction::ShowSession,
        "/help" => ReplAction::Help,
        _ => ReplAction::Send(line),
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_cyan());
    println!("  /clear    - Delete the conversation history on the server");
    println!("  /reset    - Forget this session and start a new one");
    println!("  /session  - Show the current session id");
    println!("  /help     - Show this help");
    println!("  /quit     - Leave the chat (also: exit, quit)");
}

/// Run interactive REPL mode
pub async fn run_repl_mode<B, S, V>(client: &mut ChatClient<B, S, V>, base_url: &str) -> Result<()>
where
    B: ChatBackend,
    S: SessionStore,
    V: ChatView,
{
    println!("{}", "💬 Support Chat".bright_cyan().bold());
    println!("{}", format!("Backend: {}", base_url).bright_black());
    println!("{}", format!("Session: {}", client.session_id()).bright_black());
    println!("{}", "Type '/help' for commands, 'exit' or 'quit' to leave\n".bright_black());

    client.load_history().await;

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", ">".bright_green().bold()));

        match readline {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }

                match parse_line(&line) {
                    ReplAction::Ignore => continue,
                    ReplAction::Quit => {
                        println!("{}", "Goodbye!".bright_cyan());
                        break;
                    }
                    ReplAction::Help => print_help(),
                    ReplAction::ShowSession => {
                        println!("{} {}", "🔑".bright_cyan(), client.session_id());
                    }
                    ReplAction::Clear => client.clear_history().await,
                    ReplAction::Reset => {
                        let before = client.session_id().clone();
                        client.reset_session().await;
                        if client.session_id() != &before {
                            println!(
                                "{}",
                                format!("New session: {}", client.session_id()).bright_black()
                            );
                        }
                    }
                    ReplAction::Send(message) => client.send_message(message).await,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(e) => {
                eprintln!("{} Input error: {}", "❌".bright_red(), e);
                break;
            }
        }
    }

    Ok(())
}
