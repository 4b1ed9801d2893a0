//! HTTP implementation of the chat backend
//!
//! Talks to the support bot service over `reqwest`:
//! `POST /chat`, `GET /history/{id}` and `DELETE /history/{id}`.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use supportchat_client::{ChatBackend, ChatError};
use supportchat_types::{
    chat_url, history_url, normalize_base_url, MessageEntry, SendRequest, SendResponse, SessionId,
};

/// Chat backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait(?Send)]
impl ChatBackend for HttpBackend {
    async fn send_message(&self, request: &SendRequest) -> Result<SendResponse, ChatError> {
        let url = chat_url(&self.base_url);
        log::debug!("POST {} ({} chars)", url, request.message.chars().count());

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        decode_json(check_status(response).await?).await
    }

    async fn fetch_history(&self, session_id: &SessionId) -> Result<Vec<MessageEntry>, ChatError> {
        let url = history_url(&self.base_url, session_id);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ChatError::NotFound);
        }

        decode_json(check_status(response).await?).await
    }

    async fn clear_history(&self, session_id: &SessionId) -> Result<(), ChatError> {
        let url = history_url(&self.base_url, session_id);
        log::debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await.map_err(transport_error)?;
        check_status(response).await?;
        Ok(())
    }
}

fn transport_error(error: reqwest::Error) -> ChatError {
    ChatError::Transport(error.to_string())
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ChatError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ChatError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ChatError> {
    let text = response.text().await.map_err(transport_error)?;
    serde_json::from_str(&text).map_err(|e| ChatError::Decode(e.to_string()))
}
