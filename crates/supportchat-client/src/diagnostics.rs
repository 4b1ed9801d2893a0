use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::{ChatError, ErrorKind};

/// Which client operation a failure was absorbed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    LoadHistory,
    SendMessage,
    ClearHistory,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::LoadHistory => "load_history",
            Operation::SendMessage => "send_message",
            Operation::ClearHistory => "clear_history",
        };
        f.write_str(name)
    }
}

/// Structured record of a failure the user only saw as fallback text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub operation: Operation,
    pub kind: ErrorKind,
    pub message: String,
}

impl Diagnostic {
    pub fn from_error(operation: Operation, error: &ChatError) -> Self {
        Self {
            operation,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed ({}): {}", self.operation, self.kind, self.message)
    }
}

/// Receiver of absorbed failures.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Default sink: writes through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match (diagnostic.operation, diagnostic.kind) {
            // A session the server has never seen is not an error
            (Operation::LoadHistory, ErrorKind::NotFound) => {
                log::debug!("No history on server: {}", diagnostic)
            }
            (Operation::SendMessage, _) => log::error!("{}", diagnostic),
            _ => log::warn!("{}", diagnostic),
        }
    }
}

/// Sink that keeps every diagnostic, shareable between a client and a test.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<Diagnostic>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        if let Ok(mut records) = self.records.lock() {
            records.push(diagnostic.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_shares_records() {
        let sink = RecordingSink::new();
        let handle = sink.clone();
        sink.report(&Diagnostic::from_error(
            Operation::SendMessage,
            &ChatError::Transport("connection refused".into()),
        ));

        let records = handle.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ErrorKind::Transport);
        assert_eq!(
            records[0].to_string(),
            "send_message failed (transport): transport error: connection refused"
        );
    }
}
