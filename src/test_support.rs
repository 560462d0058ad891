//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use std::sync::Arc;

use crate::backend::{BackendError, ChatBackend, ChatRequest, ChatResponse};
use crate::core::mode::Mode;
use crate::core::session::SessionId;

/// A backend for tests that don't need real HTTP calls.
pub struct NoopBackend;

#[async_trait]
impl ChatBackend for NoopBackend {
    fn describe(&self) -> String {
        "noop".to_string()
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError> {
        Ok(ChatResponse {
            response: String::new(),
            mode: request.mode.to_string(),
        })
    }

    async fn clear_chat(&self, _session_id: &SessionId) -> Result<(), BackendError> {
        Ok(())
    }

    async fn ping(&self) -> Result<String, BackendError> {
        Ok("noop".to_string())
    }
}

/// Creates a test App in reflection mode with a NoopBackend.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopBackend), Mode::Reflection)
}
