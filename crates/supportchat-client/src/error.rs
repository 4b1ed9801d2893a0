use std::fmt;
use thiserror::Error;

/// Failure of a single call against the chat backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("resource not found")]
    NotFound,
}

impl ChatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::Transport(_) => ErrorKind::Transport,
            ChatError::Status { .. } => ErrorKind::Status,
            ChatError::Decode(_) => ErrorKind::Decode,
            ChatError::NotFound => ErrorKind::NotFound,
        }
    }
}

/// Coarse classification of a [`ChatError`], used by diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Status,
    Decode,
    NotFound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Status => "status",
            ErrorKind::Decode => "decode",
            ErrorKind::NotFound => "not_found",
        };
        f.write_str(name)
    }
}

/// Failure of the durable session store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("corrupt session store: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
