use std::collections::VecDeque;
use std::sync::Arc;

use supportchat_types::{MessageEntry, Sender, SessionId, CLEAR_CONFIRMATION, RESET_CONFIRMATION};

use crate::backend::{execute, ChatBackend};
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::state::{ChatState, Command, Effect, Request};
use crate::storage::{ensure_session_id, forget_session_id, SessionStore};
use crate::view::ChatView;

/// Runtime around [`ChatState`]: applies commands and carries out the
/// resulting effects against the injected store, view and diagnostic sink.
///
/// Network requests are handed back to the caller from [`ChatClient::dispatch`]
/// so a host can run them while other events are processed. The async
/// operations below run them one after another instead.
pub struct ChatClient<B, S, V> {
    backend: Arc<B>,
    store: S,
    view: V,
    diagnostics: Box<dyn DiagnosticSink>,
    state: ChatState,
}

impl<B, S, V> ChatClient<B, S, V>
where
    B: ChatBackend,
    S: SessionStore,
    V: ChatView,
{
    pub fn new(backend: B, mut store: S, view: V) -> Self {
        let session_id = ensure_session_id(&mut store);
        log::info!("Current Session ID: {}", session_id);

        Self {
            backend: Arc::new(backend),
            store,
            view,
            diagnostics: Box::new(LogSink),
            state: ChatState::new(session_id),
        }
    }

    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    pub fn session_id(&self) -> &SessionId {
        self.state.session_id()
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn backend(&self) -> Arc<B> {
        Arc::clone(&self.backend)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Append an entry to the transcript directly.
    pub fn render_message(&mut self, text: impl Into<String>, sender: Sender) {
        let effect = self.state.render(MessageEntry::new(text, sender));
        self.perform(vec![effect]);
    }

    /// Apply one command, carry out its local effects and return the
    /// network requests it asked for.
    pub fn dispatch(&mut self, command: Command) -> Vec<Request> {
        let placeholder = ChatState::new(self.state.session_id().clone());
        let current = std::mem::replace(&mut self.state, placeholder);
        let (next, effects) = current.apply(command);
        self.state = next;
        self.perform(effects)
    }

    pub fn on_submit(&mut self, text: &str) -> Vec<Request> {
        self.dispatch(Command::Submit(text.to_string()))
    }

    pub fn on_clear(&mut self) -> Vec<Request> {
        let confirmed = self.view.confirm(CLEAR_CONFIRMATION);
        self.dispatch(Command::Clear { confirmed })
    }

    pub fn on_reset(&mut self) -> Vec<Request> {
        let confirmed = self.view.confirm(RESET_CONFIRMATION);
        self.dispatch(Command::Reset { confirmed })
    }

    /// Dispatch a command and drive every request it causes to completion.
    pub async fn run(&mut self, command: Command) {
        let requests = self.dispatch(command);
        self.drain(requests).await;
    }

    pub async fn load_history(&mut self) {
        self.run(Command::Startup).await;
    }

    pub async fn send_message(&mut self, text: &str) {
        let requests = self.on_submit(text);
        self.drain(requests).await;
    }

    pub async fn clear_history(&mut self) {
        let requests = self.on_clear();
        self.drain(requests).await;
    }

    pub async fn reset_session(&mut self) {
        let requests = self.on_reset();
        self.drain(requests).await;
    }

    async fn drain(&mut self, requests: Vec<Request>) {
        let mut queue: VecDeque<Request> = requests.into();
        while let Some(request) = queue.pop_front() {
            let backend = Arc::clone(&self.backend);
            let completion = execute(backend.as_ref(), request).await;
            queue.extend(self.dispatch(completion));
        }
    }

    fn perform(&mut self, effects: Vec<Effect>) -> Vec<Request> {
        let mut requests = Vec::new();
        for effect in effects {
            match effect {
                Effect::Render(entry) => self.view.append(&entry),
                Effect::ClearTranscript => self.view.clear_transcript(),
                Effect::ClearInput => self.view.clear_input(),
                Effect::Request(request) => requests.push(request),
                Effect::ForgetSession => forget_session_id(&mut self.store),
                Effect::Reload => requests.extend(self.reload()),
                Effect::Report(diagnostic) => self.diagnostics.report(&diagnostic),
            }
        }
        requests
    }

    fn reload(&mut self) -> Vec<Request> {
        let session_id = ensure_session_id(&mut self.store);
        log::info!("Started new session: {}", session_id);

        self.state = ChatState::new(session_id);
        self.view.clear_transcript();
        self.dispatch(Command::Startup)
    }
}
