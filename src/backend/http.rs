//! reqwest implementation of [`ChatBackend`] against the FastAPI service.
//!
//! Endpoints:
//! - `POST /chat`        → `{response, mode}` or `{detail}` on error
//! - `POST /clear_chat`  → body ignored
//! - `GET /`             → `{message}` banner

use async_trait::async_trait;
use log::{debug, info, warn};

use super::client::{BackendError, ChatBackend};
use super::types::{Banner, ChatRequest, ChatResponse, ClearChatRequest, ErrorBody};
use crate::core::config::DEFAULT_BASE_URL;
use crate::core::session::SessionId;

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Turn a non-2xx response into `BackendError::Api`, pulling `detail` out of
/// the body when it parses.
async fn api_error(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.detail_text());
    warn!("Backend error: {} - {}", status, body);
    BackendError::Api { status, detail }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError> {
        info!(
            "POST /chat: session={}, mode={}, give_answer_requested={}, message_len={}",
            request.session_id,
            request.mode,
            request.give_answer_requested,
            request.message.len()
        );

        let response = self
            .client
            .post(self.url("chat"))
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        debug!("/chat response status: {}", response.status());

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))?;
        debug!(
            "/chat reply: mode={}, response_len={}",
            parsed.mode,
            parsed.response.len()
        );
        Ok(parsed)
    }

    async fn clear_chat(&self, session_id: &SessionId) -> Result<(), BackendError> {
        info!("POST /clear_chat: session={}", session_id);

        let body = ClearChatRequest {
            session_id: session_id.clone(),
        };
        let response = self
            .client
            .post(self.url("clear_chat"))
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<String, BackendError> {
        let response = self
            .client
            .get(self.url(""))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let banner: Banner = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        Ok(banner.message)
    }
}
