//! Platform-neutral chat client core
//!
//! This crate owns the session identifier lifecycle, the transcript state
//! machine and the seams (backend, storage, view, diagnostics) that the
//! terminal and browser front ends plug into.

pub mod backend;
pub mod client;
pub mod diagnostics;
pub mod error;
pub mod state;
pub mod storage;
pub mod view;

// Re-export commonly used types
pub use backend::{execute, ChatBackend};
pub use client::ChatClient;
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, Operation, RecordingSink};
pub use error::{ChatError, ErrorKind, StoreError};
pub use state::{ChatState, Command, Effect, Phase, Request, Transcript};
pub use storage::{ensure_session_id, forget_session_id, MemoryStore, SessionStore};
pub use view::ChatView;

pub use supportchat_types as types;
