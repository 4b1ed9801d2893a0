use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use supportchat_client::{ChatBackend, ChatError};
use supportchat_types::{
    chat_url, history_url, normalize_base_url, MessageEntry, SendRequest, SendResponse, SessionId,
};

/// Chat backend reached through the browser's `fetch`
pub struct GlooBackend {
    base_url: String,
}

impl GlooBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
        }
    }
}

fn transport_error(e: gloo_net::Error) -> ChatError {
    ChatError::Transport(e.to_string())
}

async fn check_status(response: Response) -> Result<Response, ChatError> {
    if response.ok() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ChatError::Status {
        status: response.status(),
        body,
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ChatError> {
    let text = response.text().await.map_err(transport_error)?;
    serde_json::from_str(&text).map_err(|e| ChatError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl ChatBackend for GlooBackend {
    async fn send_message(&self, request: &SendRequest) -> Result<SendResponse, ChatError> {
        let response = Request::post(&chat_url(&self.base_url))
            .json(request)
            .map_err(|e| ChatError::Transport(format!("Failed to serialize: {}", e)))?
            .send()
            .await
            .map_err(transport_error)?;

        decode_json(check_status(response).await?).await
    }

    async fn fetch_history(&self, session_id: &SessionId) -> Result<Vec<MessageEntry>, ChatError> {
        let response = Request::get(&history_url(&self.base_url, session_id))
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == 404 {
            return Err(ChatError::NotFound);
        }
        decode_json(check_status(response).await?).await
    }

    async fn clear_history(&self, session_id: &SessionId) -> Result<(), ChatError> {
        let response = Request::delete(&history_url(&self.base_url, session_id))
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response).await?;
        Ok(())
    }
}
