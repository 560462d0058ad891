//! # Core Application Logic
//!
//! This module contains thinkk's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │──► backend (HTTP)
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`message`]: Chat messages and their authors
//! - [`mode`]: Reflection / answer mode
//! - [`session`]: Session identifiers
//! - [`config`]: Config file + env + CLI resolution

pub mod action;
pub mod config;
pub mod message;
pub mod mode;
pub mod session;
pub mod state;
