//! Core types and structures for supportchat
//!
//! This crate provides the wire and domain types shared by the chat core,
//! the HTTP backend and both front ends.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Storage key under which the session identifier is persisted
pub const SESSION_STORAGE_KEY: &str = "chat_session_id";

/// Backend used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Bot entry shown when there is no history to display
pub const DEFAULT_GREETING: &str = "Hello! How can I help you today?";

/// Bot entry shown in place of a reply that could not be obtained
pub const APOLOGY_MESSAGE: &str =
    "Sorry, there was an error connecting to the bot. Please try again later.";

pub const CLEAR_CONFIRMATION: &str = "Are you sure you want to clear the chat history?";

pub const RESET_CONFIRMATION: &str =
    "Start a new conversation? Your current session will be forgotten.";

/// Length of the random base-36 tail of a session identifier
pub const SESSION_SUFFIX_LEN: usize = 7;

const BASE36_DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// ============================================================================
// Session Identifier
// ============================================================================

/// Opaque token correlating one client with its server-side history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap an identifier read back from storage.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh identifier: `session_<unix millis>_<7 base-36 chars>`.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        Self::generate_with(millis, &mut rand::thread_rng())
    }

    /// Mint an identifier from an explicit clock reading and random source.
    pub fn generate_with<R: Rng>(millis: i64, rng: &mut R) -> Self {
        let suffix: String = (0..SESSION_SUFFIX_LEN)
            .map(|_| BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())] as char)
            .collect();
        Self(format!("session_{}_{}", millis, suffix))
    }

    /// Parse an identifier read back from storage. Only URL-unreserved
    /// characters are accepted, since the id becomes a path segment.
    pub fn parse(id: &str) -> Option<Self> {
        let id = id.trim();
        let valid = !id.is_empty()
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b'~'));
        valid.then(|| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transcript record, in the shape the history endpoint returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    pub message: String,
    pub sender: Sender,
}

impl MessageEntry {
    pub fn new(message: impl Into<String>, sender: Sender) -> Self {
        Self {
            message: message.into(),
            sender,
        }
    }

    pub fn user(message: impl Into<String>) -> Self {
        Self::new(message, Sender::User)
    }

    pub fn bot(message: impl Into<String>) -> Self {
        Self::new(message, Sender::Bot)
    }

    pub fn greeting() -> Self {
        Self::bot(DEFAULT_GREETING)
    }

    pub fn apology() -> Self {
        Self::bot(APOLOGY_MESSAGE)
    }
}

// ============================================================================
// API Types
// ============================================================================

/// Body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    pub session_id: SessionId,
    pub message: String,
}

/// Successful reply from `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResponse {
    pub response: String,
}

// ============================================================================
// Endpoints
// ============================================================================

/// Normalize a user-supplied base URL: trim, add a scheme if missing and
/// drop trailing slashes.
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_BASE_URL.to_string();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// `{base}/chat`
pub fn chat_url(base_url: &str) -> String {
    format!("{}/chat", base_url.trim_end_matches('/'))
}

/// `{base}/history/{session_id}`
pub fn history_url(base_url: &str, session_id: &SessionId) -> String {
    format!("{}/history/{}", base_url.trim_end_matches('/'), session_id)
}
