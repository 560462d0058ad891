//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive everything they show as struct fields and are rebuilt every frame:
//! - `Header`: brand, status, session and shortcut hint
//! - `Message`: one chat bubble
//! - `ThinkingIndicator`: placeholder bubble while a reply is pending
//! - `ModeBar`: mode chips, give-answer trigger, mode description
//! - `Welcome`: empty-conversation screen
//!
//! ### Stateful Components (Event-Driven)
//!
//! Keep local state across frames and emit events through `EventHandler`:
//! - `InputBox`: multi-line editor, emits `InputEvent`
//! - `MessageListState`: scroll position and layout cache for `MessageList`
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (top bar)
//! ├── message.rs       (single bubble)
//! ├── message_list.rs  (scrollable conversation)
//! ├── thinking.rs      (pending-reply placeholder)
//! ├── mode_bar.rs      (bottom bar)
//! ├── welcome.rs       (empty state)
//! └── input_box/       (editor + row layout)
//! ```

pub mod header;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod mode_bar;
pub mod thinking;
pub mod welcome;

pub use header::Header;
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use mode_bar::{GiveAnswerChip, ModeBar};
pub use welcome::Welcome;
