use async_trait::async_trait;
use thiserror::Error;

use super::types::{ChatRequest, ChatResponse};
use crate::core::session::SessionId;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport failure (connection refused, DNS, broken body).
    #[error("{0}")]
    Network(String),
    /// Backend answered with a non-2xx status. `detail` comes from the
    /// `{detail}` error body when present.
    #[error("{}", api_message(*status, detail.as_deref()))]
    Api { status: u16, detail: Option<String> },
    /// Success status but the body was not what we expect.
    #[error("could not parse backend response: {0}")]
    Parse(String),
}

fn api_message(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => detail.to_string(),
        None => format!("HTTP error! status: {status}"),
    }
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short human-readable location, shown in logs and the status line.
    fn describe(&self) -> String;

    /// `POST /chat`: send one user turn and wait for the reply.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError>;

    /// `POST /clear_chat`: drop the server-side history of a session.
    async fn clear_chat(&self, session_id: &SessionId) -> Result<(), BackendError>;

    /// `GET /`: banner text, used as a start-up reachability check.
    async fn ping(&self) -> Result<String, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_detail() {
        let err = BackendError::Api {
            status: 429,
            detail: Some("Our AI is currently experiencing high traffic.".to_string()),
        };
        assert_eq!(err.to_string(), "Our AI is currently experiencing high traffic.");
    }

    #[test]
    fn api_error_without_detail_names_status() {
        let err = BackendError::Api {
            status: 502,
            detail: None,
        };
        assert_eq!(err.to_string(), "HTTP error! status: 502");
    }
}
