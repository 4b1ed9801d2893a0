use async_trait::async_trait;
use supportchat_types::{MessageEntry, SendRequest, SendResponse, SessionId};

use crate::error::ChatError;
use crate::state::{Command, Request};

/// Remote chat service as seen by the client.
///
/// Futures are not required to be `Send` so the same trait can be backed
/// by the browser's `fetch` as well as by a tokio HTTP client.
#[async_trait(?Send)]
pub trait ChatBackend {
    /// `POST /chat`
    async fn send_message(&self, request: &SendRequest) -> Result<SendResponse, ChatError>;

    /// `GET /history/{session_id}`. A 404 must surface as [`ChatError::NotFound`].
    async fn fetch_history(&self, session_id: &SessionId) -> Result<Vec<MessageEntry>, ChatError>;

    /// `DELETE /history/{session_id}`
    async fn clear_history(&self, session_id: &SessionId) -> Result<(), ChatError>;
}

/// Run one network request and turn its outcome into the command that
/// completes it.
pub async fn execute<B>(backend: &B, request: Request) -> Command
where
    B: ChatBackend + ?Sized,
{
    match request {
        Request::Send(body) => {
            let result = backend.send_message(&body).await;
            Command::ReplyReceived {
                session_id: body.session_id,
                result,
            }
        }
        Request::FetchHistory(session_id) => {
            let result = backend.fetch_history(&session_id).await;
            Command::HistoryLoaded { session_id, result }
        }
        Request::DeleteHistory(session_id) => {
            let result = backend.clear_history(&session_id).await;
            Command::HistoryCleared { session_id, result }
        }
    }
}
