//! Wire types for the assistant backend.

use serde::{Deserialize, Serialize};

use crate::core::mode::Mode;
use crate::core::session::SessionId;

/// Body of `POST /chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub session_id: SessionId,
    pub message: String,
    pub mode: Mode,
    pub give_answer_requested: bool,
}

/// Success body of `POST /chat`.
///
/// `mode` is kept as a raw string: the backend may echo it in any case, and
/// the reducer decides what to do with values it doesn't recognise.
/// Extra fields (the backend also echoes `session_id`) are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    pub mode: String,
}

/// Body of `POST /clear_chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClearChatRequest {
    pub session_id: SessionId,
}

/// Error body of any non-2xx response.
///
/// FastAPI sends a string for `HTTPException` and a list of objects for
/// request validation failures, so `detail` is left untyped.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable detail: strings verbatim, anything else as compact JSON.
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Body of `GET /`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Banner {
    pub message: String,
}
