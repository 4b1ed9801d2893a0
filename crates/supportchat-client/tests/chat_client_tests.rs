mod common;

use common::{RecordingView, ScriptedBackend};
use pretty_assertions::assert_eq;
use supportchat_client::types::{
    MessageEntry, Sender, SendResponse, APOLOGY_MESSAGE, CLEAR_CONFIRMATION, DEFAULT_GREETING,
    SESSION_STORAGE_KEY,
};
use supportchat_client::{
    ChatClient, ChatError, Command, ErrorKind, MemoryStore, Operation, Phase, RecordingSink,
    SessionStore,
};

fn client_with(
    backend: ScriptedBackend,
    view: RecordingView,
) -> (ChatClient<ScriptedBackend, MemoryStore, RecordingView>, RecordingSink) {
    let sink = RecordingSink::new();
    let client = ChatClient::new(backend, MemoryStore::new(), view).with_diagnostics(sink.clone());
    (client, sink)
}

#[test]
fn test_session_id_is_stable_and_persisted() {
    let mut store = MemoryStore::new();
    store.save(SESSION_STORAGE_KEY, "session_99_zzzzzzz").unwrap();

    let client = ChatClient::new(ScriptedBackend::new(), store, RecordingView::default());
    assert_eq!(client.session_id().as_str(), "session_99_zzzzzzz");
    assert_eq!(
        client.store().load(SESSION_STORAGE_KEY).unwrap().as_deref(),
        Some("session_99_zzzzzzz")
    );
}

#[tokio::test]
async fn test_reset_session_mints_new_id_and_reloads() {
    let backend = ScriptedBackend::new()
        .with_history(Ok(vec![MessageEntry::user("old"), MessageEntry::bot("older")]));
    let (mut client, _) = client_with(backend, RecordingView::confirming());
    client.load_history().await;
    let before = client.session_id().clone();

    client.reset_session().await;

    let after = client.session_id().clone();
    assert_ne!(before, after);
    assert_eq!(
        client.store().load(SESSION_STORAGE_KEY).unwrap().as_deref(),
        Some(after.as_str())
    );
    assert_eq!(
        client.backend().calls(),
        vec![format!("GET /history/{}", before), format!("GET /history/{}", after)]
    );
    assert_eq!(client.state().phase(), Phase::Idle);
}

#[tokio::test]
async fn test_late_history_from_previous_session_is_dropped_after_reset() {
    let (mut client, sink) = client_with(ScriptedBackend::new(), RecordingView::confirming());
    let before = client.session_id().clone();
    let pending = client.dispatch(Command::Startup);
    assert_eq!(pending.len(), 1);

    // Reset while the first history fetch is still in flight
    let reloaded = client.on_reset();
    for request in reloaded {
        let backend = client.backend();
        let completion = supportchat_client::execute(backend.as_ref(), request).await;
        client.dispatch(completion);
    }
    assert_eq!(client.view().entries, vec![MessageEntry::greeting()]);

    let follow_up = client.dispatch(Command::HistoryLoaded {
        session_id: before.clone(),
        result: Ok(vec![MessageEntry::user("from the old session")]),
    });
    let late_reply = client.dispatch(Command::ReplyReceived {
        session_id: before,
        result: Err(ChatError::Transport("reset".into())),
    });

    assert!(follow_up.is_empty() && late_reply.is_empty());
    assert_eq!(client.view().entries, vec![MessageEntry::greeting()]);
    assert_eq!(client.state().transcript().entries(), &[MessageEntry::greeting()]);
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_declined_reset_keeps_session() {
    let (mut client, _) = client_with(ScriptedBackend::new(), RecordingView::declining());
    let before = client.session_id().clone();

    client.reset_session().await;

    assert_eq!(client.session_id(), &before);
    assert!(client.backend().calls().is_empty());
}

#[tokio::test]
async fn test_empty_history_shows_greeting() {
    let (mut client, sink) = client_with(ScriptedBackend::new(), RecordingView::default());
    client.load_history().await;

    assert_eq!(client.view().entries, vec![MessageEntry::bot(DEFAULT_GREETING)]);
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_missing_history_shows_greeting() {
    let backend = ScriptedBackend::new().with_history(Err(ChatError::NotFound));
    let (mut client, sink) = client_with(backend, RecordingView::default());
    client.load_history().await;

    assert_eq!(client.view().entries, vec![MessageEntry::greeting()]);
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_history_failure_degrades_to_greeting() {
    let backend = ScriptedBackend::new()
        .with_history(Err(ChatError::Transport("connection refused".to_string())));
    let (mut client, sink) = client_with(backend, RecordingView::default());
    client.load_history().await;

    assert_eq!(client.view().entries, vec![MessageEntry::greeting()]);
    assert_eq!(sink.records()[0].operation, Operation::LoadHistory);
    assert_eq!(sink.records()[0].kind, ErrorKind::Transport);
}

#[tokio::test]
async fn test_history_rendered_in_order_after_clearing() {
    let backend = ScriptedBackend::new()
        .with_history(Ok(vec![MessageEntry::user("hi"), MessageEntry::bot("hello")]));
    let (mut client, _) = client_with(backend, RecordingView::default());
    client.render_message("stale", Sender::Bot);

    client.load_history().await;

    assert_eq!(
        client.view().entries,
        vec![MessageEntry::user("hi"), MessageEntry::bot("hello")]
    );
    assert_eq!(client.state().transcript().entries(), client.view().entries.as_slice());
}

#[tokio::test]
async fn test_history_loads_only_once() {
    let (mut client, _) = client_with(ScriptedBackend::new(), RecordingView::default());
    client.load_history().await;
    client.load_history().await;

    assert_eq!(client.backend().calls().len(), 1);
}

#[tokio::test]
async fn test_blank_messages_are_ignored() {
    let (mut client, _) = client_with(ScriptedBackend::new(), RecordingView::default());
    client.send_message("").await;
    client.send_message("   ").await;

    assert!(client.view().entries.is_empty());
    assert_eq!(client.view().input_clears, 0);
    assert!(client.backend().calls().is_empty());
}

#[tokio::test]
async fn test_send_renders_user_then_bot() {
    let backend = ScriptedBackend::new().with_reply(Ok(SendResponse { response: "hello".into() }));
    let (mut client, sink) = client_with(backend, RecordingView::default());
    let session_id = client.session_id().clone();

    client.send_message("hi").await;

    assert_eq!(
        client.view().entries,
        vec![MessageEntry::user("hi"), MessageEntry::bot("hello")]
    );
    assert_eq!(client.view().input_clears, 1);
    assert_eq!(client.backend().calls(), vec![format!("POST /chat {} hi", session_id)]);
    assert!(sink.records().is_empty());
    assert_eq!(client.state().phase(), Phase::Idle);
}

#[tokio::test]
async fn test_send_failure_renders_apology() {
    let backend = ScriptedBackend::new().with_reply(Err(ChatError::Status {
        status: 500,
        body: "Internal Server Error".into(),
    }));
    let (mut client, sink) = client_with(backend, RecordingView::default());

    client.send_message("hi").await;

    assert_eq!(
        client.view().entries,
        vec![MessageEntry::user("hi"), MessageEntry::bot(APOLOGY_MESSAGE)]
    );
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].operation, Operation::SendMessage);
    assert_eq!(records[0].kind, ErrorKind::Status);
    assert!(records[0].message.contains("500"));
}

#[tokio::test]
async fn test_clear_history_resets_to_greeting() {
    for clear in [Ok(()), Err(ChatError::Transport("offline".into()))] {
        let failed = clear.is_err();
        let backend = ScriptedBackend::new()
            .with_history(Ok(vec![MessageEntry::user("a"), MessageEntry::bot("b")]))
            .with_clear(clear);
        let (mut client, sink) = client_with(backend, RecordingView::confirming());
        client.load_history().await;
        client.send_message("c").await;

        client.clear_history().await;

        assert_eq!(client.view().entries, vec![MessageEntry::greeting()]);
        assert_eq!(client.view().prompts, vec![CLEAR_CONFIRMATION.to_string()]);
        assert_eq!(
            client.backend().calls().last().cloned(),
            Some(format!("DELETE /history/{}", client.session_id()))
        );
        assert_eq!(
            sink.records().iter().any(|d| d.operation == Operation::ClearHistory),
            failed
        );
    }
}

#[tokio::test]
async fn test_declined_clear_does_nothing() {
    let (mut client, _) = client_with(ScriptedBackend::new(), RecordingView::declining());
    client.render_message("keep me", Sender::User);

    client.clear_history().await;

    assert_eq!(client.view().entries, vec![MessageEntry::user("keep me")]);
    assert!(client.backend().calls().is_empty());
}

#[tokio::test]
async fn test_overlapping_sends_render_in_completion_order() {
    let backend = ScriptedBackend::new().with_reply(Ok(SendResponse { response: "ok".into() }));
    let (mut client, _) = client_with(backend, RecordingView::default());

    let first = client.on_submit("one");
    let second = client.on_submit("two");
    assert_eq!(client.state().pending_sends(), 2);

    // Complete the second request before the first
    for request in second.into_iter().chain(first) {
        let backend = client.backend();
        let completion = supportchat_client::execute(backend.as_ref(), request).await;
        client.dispatch(completion);
    }

    assert_eq!(
        client.view().entries,
        vec![
            MessageEntry::user("one"),
            MessageEntry::user("two"),
            MessageEntry::bot("ok"),
            MessageEntry::bot("ok"),
        ]
    );
    assert_eq!(client.state().phase(), Phase::Idle);
}
