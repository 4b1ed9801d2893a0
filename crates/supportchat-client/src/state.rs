//! Chat state and its pure command handlers.
//!
//! [`ChatState::apply`] never touches the network, storage or display. It
//! returns the next state together with the [`Effect`]s a runtime has to
//! carry out, so every transition can be checked without a live page.

use supportchat_types::{MessageEntry, SendRequest, SendResponse, SessionId};

use crate::diagnostics::{Diagnostic, Operation};
use crate::error::ChatError;

/// Ordered entries currently on display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<MessageEntry>,
}

impl Transcript {
    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: MessageEntry) {
        self.entries.push(entry);
    }

    fn reset_to(&mut self, entries: Vec<MessageEntry>) {
        self.entries = entries;
    }
}

/// Coarse client phase, derived from the outstanding work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LoadingHistory,
    AwaitingReply,
}

/// Events a client reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// The page (or terminal session) is ready
    Startup,
    /// Raw input from the message field
    Submit(String),
    /// Completions carry the session they were issued for; a client that
    /// has moved on to another session ignores them.
    HistoryLoaded {
        session_id: SessionId,
        result: Result<Vec<MessageEntry>, ChatError>,
    },
    ReplyReceived {
        session_id: SessionId,
        result: Result<SendResponse, ChatError>,
    },
    /// Clear control, after the user answered the confirmation
    Clear { confirmed: bool },
    HistoryCleared {
        session_id: SessionId,
        result: Result<(), ChatError>,
    },
    /// Reset control, after the user answered the confirmation
    Reset { confirmed: bool },
}

/// Network calls a transition asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Send(SendRequest),
    FetchHistory(SessionId),
    DeleteHistory(SessionId),
}

/// Side effects requested by a transition, in execution order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Render(MessageEntry),
    ClearTranscript,
    ClearInput,
    Request(Request),
    /// Remove the persisted session identifier
    ForgetSession,
    /// Rebuild the client from scratch under a new identifier
    Reload,
    Report(Diagnostic),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    session_id: SessionId,
    transcript: Transcript,
    pending_sends: usize,
    loading_history: bool,
    started: bool,
}

impl ChatState {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            transcript: Transcript::default(),
            pending_sends: 0,
            loading_history: false,
            started: false,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pending_sends(&self) -> usize {
        self.pending_sends
    }

    pub fn phase(&self) -> Phase {
        if self.pending_sends > 0 {
            Phase::AwaitingReply
        } else if self.loading_history {
            Phase::LoadingHistory
        } else {
            Phase::Idle
        }
    }

    /// Append an entry outside of any command, returning the render effect.
    pub fn render(&mut self, entry: MessageEntry) -> Effect {
        self.transcript.push(entry.clone());
        Effect::Render(entry)
    }

    pub fn apply(mut self, command: Command) -> (Self, Vec<Effect>) {
        let effects = match command {
            Command::Startup => self.on_startup(),
            Command::Submit(text) => self.on_submit(&text),
            Command::HistoryLoaded { session_id, .. }
            | Command::ReplyReceived { session_id, .. }
            | Command::HistoryCleared { session_id, .. }
                if session_id != self.session_id =>
            {
                log::debug!("Dropping late response for abandoned session {}", session_id);
                Vec::new()
            }
            Command::HistoryLoaded { result, .. } => self.on_history_loaded(result),
            Command::ReplyReceived { result, .. } => self.on_reply(result),
            Command::Clear { confirmed } => self.on_clear(confirmed),
            Command::HistoryCleared { result, .. } => self.on_cleared(result),
            Command::Reset { confirmed } => self.on_reset(confirmed),
        };
        (self, effects)
    }

    fn on_startup(&mut self) -> Vec<Effect> {
        // History is loaded once per client lifetime
        if self.started {
            return Vec::new();
        }
        self.started = true;
        self.loading_history = true;
        vec![Effect::Request(Request::FetchHistory(self.session_id.clone()))]
    }

    fn on_submit(&mut self, text: &str) -> Vec<Effect> {
        let message = text.trim();
        if message.is_empty() {
            return Vec::new();
        }

        self.pending_sends += 1;
        let render = self.render(MessageEntry::user(message));
        vec![
            render,
            Effect::ClearInput,
            Effect::Request(Request::Send(SendRequest {
                session_id: self.session_id.clone(),
                message: message.to_string(),
            })),
        ]
    }

    fn on_history_loaded(&mut self, result: Result<Vec<MessageEntry>, ChatError>) -> Vec<Effect> {
        self.loading_history = false;

        let mut effects = Vec::new();
        let entries = match result {
            Ok(entries) if !entries.is_empty() => entries,
            Ok(_) => vec![MessageEntry::greeting()],
            Err(e) => {
                effects.push(Effect::Report(Diagnostic::from_error(Operation::LoadHistory, &e)));
                vec![MessageEntry::greeting()]
            }
        };

        effects.push(Effect::ClearTranscript);
        effects.extend(entries.iter().cloned().map(Effect::Render));
        self.transcript.reset_to(entries);
        effects
    }

    fn on_reply(&mut self, result: Result<SendResponse, ChatError>) -> Vec<Effect> {
        self.pending_sends = self.pending_sends.saturating_sub(1);

        match result {
            Ok(reply) => vec![self.render(MessageEntry::bot(reply.response))],
            Err(e) => vec![
                self.render(MessageEntry::apology()),
                Effect::Report(Diagnostic::from_error(Operation::SendMessage, &e)),
            ],
        }
    }

    fn on_clear(&mut self, confirmed: bool) -> Vec<Effect> {
        if !confirmed {
            return Vec::new();
        }
        vec![Effect::Request(Request::DeleteHistory(self.session_id.clone()))]
    }

    fn on_cleared(&mut self, result: Result<(), ChatError>) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Err(e) = result {
            effects.push(Effect::Report(Diagnostic::from_error(Operation::ClearHistory, &e)));
        }

        self.transcript.reset_to(vec![MessageEntry::greeting()]);
        effects.push(Effect::ClearTranscript);
        effects.push(Effect::Render(MessageEntry::greeting()));
        effects
    }

    fn on_reset(&mut self, confirmed: bool) -> Vec<Effect> {
        if !confirmed {
            return Vec::new();
        }
        vec![Effect::ForgetSession, Effect::Reload]
    }
}
