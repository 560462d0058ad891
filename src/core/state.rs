//! # Application State
//!
//! Core business state for thinkk. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn ChatBackend>    // assistant service
//! ├── session_id: SessionId            // correlates requests server-side
//! ├── mode: Mode                       // reflection | answer
//! ├── messages: Vec<ChatMessage>       // visible conversation
//! ├── is_thinking: bool                // a /chat request is in flight
//! ├── clear_pending: bool              // a /clear_chat request is in flight
//! ├── give_answer_requested: bool      // next request asks for the answer
//! ├── status_message: String           // header status text
//! └── next_message_id: u64             // monotonic message ids
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::backend::ChatBackend;
use crate::core::message::ChatMessage;
use crate::core::mode::Mode;
use crate::core::session::SessionId;

pub struct App {
    pub backend: Arc<dyn ChatBackend>,
    pub session_id: SessionId,
    pub mode: Mode,
    pub messages: Vec<ChatMessage>,
    pub is_thinking: bool,
    pub clear_pending: bool,
    pub give_answer_requested: bool,
    pub status_message: String,
    next_message_id: u64,
}

impl App {
    pub fn new(backend: Arc<dyn ChatBackend>, mode: Mode) -> Self {
        Self {
            backend,
            session_id: SessionId::generate(),
            mode,
            messages: Vec::new(),
            is_thinking: false,
            clear_pending: false,
            give_answer_requested: false,
            status_message: String::new(),
            next_message_id: 1,
        }
    }

    /// Hand out the next message id. Never reused, even across clears.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }

    /// True while any backend request is outstanding. New chat requests
    /// wait until this clears.
    pub fn is_busy(&self) -> bool {
        self.is_thinking || self.clear_pending
    }

    /// Whether the "Give me the answer" trigger is currently offered.
    pub fn can_give_answer(&self) -> bool {
        self.mode == Mode::Reflection
            && !self.messages.is_empty()
            && !self.is_busy()
            && !self.give_answer_requested
    }
}
