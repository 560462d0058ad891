//! # Chat Messages
//!
//! One entry in the visible conversation. Messages are created when the user
//! sends or the backend replies, and are never edited afterwards.

use chrono::Local;

use crate::core::mode::Mode;

/// Who wrote a message. Bot replies always carry the mode they were
/// produced in, so there is no "bot without a mode" state to check for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot { mode: Mode },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Monotonically increasing within a run. Survives chat clears.
    pub id: u64,
    /// Raw text, possibly markdown.
    pub text: String,
    pub author: Author,
    /// Wall-clock display string, e.g. `3:04:05 PM`.
    pub timestamp: String,
}

impl ChatMessage {
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            author: Author::User,
            timestamp: display_time(),
        }
    }

    pub fn bot(id: u64, text: impl Into<String>, mode: Mode) -> Self {
        Self {
            id,
            text: text.into(),
            author: Author::Bot { mode },
            timestamp: display_time(),
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self.author, Author::User)
    }

    /// The mode tag of a bot reply; `None` for user messages.
    pub fn mode(&self) -> Option<Mode> {
        match self.author {
            Author::User => None,
            Author::Bot { mode } => Some(mode),
        }
    }
}

fn display_time() -> String {
    Local::now().format("%-I:%M:%S %p").to_string()
}
