#![allow(dead_code)]

use async_trait::async_trait;
use std::cell::RefCell;
use supportchat_client::{ChatBackend, ChatError, ChatView};
use supportchat_client::types::{MessageEntry, SendRequest, SendResponse, SessionId};

/// Backend that answers every call with a canned result and records the calls.
pub struct ScriptedBackend {
    pub reply: Result<SendResponse, ChatError>,
    pub history: Result<Vec<MessageEntry>, ChatError>,
    pub clear: Result<(), ChatError>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            reply: Ok(SendResponse { response: "hello".to_string() }),
            history: Ok(Vec::new()),
            clear: Ok(()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_reply(mut self, reply: Result<SendResponse, ChatError>) -> Self {
        self.reply = reply;
        self
    }

    pub fn with_history(mut self, history: Result<Vec<MessageEntry>, ChatError>) -> Self {
        self.history = history;
        self
    }

    pub fn with_clear(mut self, clear: Result<(), ChatError>) -> Self {
        self.clear = clear;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ChatBackend for ScriptedBackend {
    async fn send_message(&self, request: &SendRequest) -> Result<SendResponse, ChatError> {
        self.calls
            .borrow_mut()
            .push(format!("POST /chat {} {}", request.session_id, request.message));
        self.reply.clone()
    }

    async fn fetch_history(&self, session_id: &SessionId) -> Result<Vec<MessageEntry>, ChatError> {
        self.calls.borrow_mut().push(format!("GET /history/{}", session_id));
        self.history.clone()
    }

    async fn clear_history(&self, session_id: &SessionId) -> Result<(), ChatError> {
        self.calls.borrow_mut().push(format!("DELETE /history/{}", session_id));
        self.clear.clone()
    }
}

/// View that keeps what it would have displayed.
#[derive(Default)]
pub struct RecordingView {
    pub entries: Vec<MessageEntry>,
    pub input_clears: usize,
    pub prompts: Vec<String>,
    pub answer: bool,
}

impl RecordingView {
    pub fn confirming() -> Self {
        Self { answer: true, ..Self::default() }
    }

    pub fn declining() -> Self {
        Self { answer: false, ..Self::default() }
    }
}

impl ChatView for RecordingView {
    fn append(&mut self, entry: &MessageEntry) {
        self.entries.push(entry.clone());
    }

    fn clear_transcript(&mut self) {
        self.entries.clear();
    }

    fn clear_input(&mut self) {
        self.input_clears += 1;
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.answer
    }
}
