use colored::Colorize;
use std::io::{self, BufRead, Write};

use supportchat_client::ChatView;
use supportchat_types::{MessageEntry, Sender};

/// Transcript printed line by line to a terminal.
pub struct TerminalView<W: Write> {
    out: W,
    shown: usize,
    auto_confirm: bool,
}

impl TerminalView<io::Stdout> {
    pub fn stdout(auto_confirm: bool) -> Self {
        Self::new(io::stdout(), auto_confirm)
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, auto_confirm: bool) -> Self {
        Self {
            out,
            shown: 0,
            auto_confirm,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        // A closed stdout is not worth failing the chat over
        let _ = writeln!(self.out, "{}", line);
        let _ = self.out.flush();
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn append(&mut self, entry: &MessageEntry) {
        let label = match entry.sender {
            Sender::User => "You:".bright_green().bold(),
            Sender::Bot => "Bot:".bright_cyan().bold(),
        };
        self.write_line(&format!("{} {}", label, entry.message));
        self.shown += 1;
    }

    fn clear_transcript(&mut self) {
        if self.shown > 0 {
            self.write_line(&"──────── transcript cleared ────────".bright_black().to_string());
        }
        self.shown = 0;
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.auto_confirm {
            return true;
        }

        let _ = write!(self.out, "{} {} ", prompt.yellow(), "[y/N]".bright_black());
        let _ = self.out.flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
