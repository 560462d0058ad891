//! # Actions
//!
//! Everything that can happen in thinkk becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend replies? That's `Action::ResponseReceived { .. }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing the I/O the
//! adapter should perform next. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::backend::{BackendError, ChatRequest, ChatResponse};
use crate::core::message::ChatMessage;
use crate::core::mode::Mode;
use crate::core::session::SessionId;
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    /// User pressed Enter with the given input buffer.
    Submit(String),
    /// User asked for the direct answer; carries whatever is in the input.
    GiveAnswer(String),
    SetMode(Mode),
    ToggleMode,
    /// `/chat` succeeded for the given session.
    ResponseReceived {
        session_id: SessionId,
        response: ChatResponse,
    },
    /// `/chat` failed for the given session.
    ResponseFailed {
        session_id: SessionId,
        error: BackendError,
    },
    /// User started a new chat.
    ClearChat,
    /// `/clear_chat` finished, successfully or not.
    ChatCleared(Result<(), BackendError>),
    /// Outcome of the start-up reachability check.
    BackendStatus(Result<String, BackendError>),
    Quit,
}

/// I/O requested by `update()`, executed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SendChat(ChatRequest),
    ClearRemote(SessionId),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Submit(text) => submit(app, text),
        Action::GiveAnswer(text) => {
            if !app.can_give_answer() {
                debug!("Give-answer ignored (not available right now)");
                return Effect::None;
            }
            app.give_answer_requested = true;
            submit(app, text)
        }
        Action::SetMode(mode) => {
            app.mode = mode;
            Effect::None
        }
        Action::ToggleMode => {
            app.mode = app.mode.toggled();
            Effect::None
        }
        Action::ResponseReceived {
            session_id,
            response,
        } => {
            finish_request(app);
            if session_id != app.session_id {
                info!("Dropping reply for stale session {}", session_id);
                return Effect::None;
            }
            let mode = match response.mode.parse::<Mode>() {
                Ok(mode) => mode,
                Err(e) => {
                    warn!("{}; tagging reply as {}", e, app.mode);
                    app.mode
                }
            };
            let id = app.next_id();
            app.messages
                .push(ChatMessage::bot(id, response.response, mode));
            Effect::None
        }
        Action::ResponseFailed { session_id, error } => {
            finish_request(app);
            warn!("Error sending message: {}", error);
            if session_id != app.session_id {
                return Effect::None;
            }
            let id = app.next_id();
            app.messages
                .push(ChatMessage::bot(id, error_text(&error), Mode::Answer));
            Effect::None
        }
        Action::ClearChat => {
            if app.clear_pending {
                debug!("Clear ignored, one is already pending");
                return Effect::None;
            }
            app.clear_pending = true;
            Effect::ClearRemote(app.session_id.clone())
        }
        Action::ChatCleared(result) => {
            // Local state resets no matter what the server said. A /chat
            // request still in flight keeps `is_thinking` until its (now
            // stale) reply comes back.
            app.messages.clear();
            app.session_id = SessionId::generate();
            app.give_answer_requested = false;
            app.clear_pending = false;
            match result {
                Ok(()) => {
                    info!("Chat cleared, new session {}", app.session_id);
                    app.status_message = String::from("New chat");
                }
                Err(e) => {
                    warn!("Error clearing chat: {}", e);
                    app.status_message =
                        format!("New chat (server history may remain: {e})");
                }
            }
            Effect::None
        }
        Action::BackendStatus(result) => {
            app.status_message = match result {
                Ok(banner) => {
                    info!("Backend reachable: {}", banner);
                    format!("Connected to {}", app.backend.describe())
                }
                Err(e) => {
                    warn!("Backend unreachable: {}", e);
                    format!("Backend unreachable at {}", app.backend.describe())
                }
            };
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, text: String) -> Effect {
    if app.is_busy() {
        debug!("Submit ignored while a request is pending");
        return Effect::None;
    }

    let message = text.trim().to_string();
    if message.is_empty() && !app.give_answer_requested {
        return Effect::None;
    }

    if !message.is_empty() {
        let id = app.next_id();
        app.messages.push(ChatMessage::user(id, message.clone()));
    }

    app.is_thinking = true;
    Effect::SendChat(ChatRequest {
        session_id: app.session_id.clone(),
        message,
        mode: app.mode,
        give_answer_requested: app.give_answer_requested,
    })
}

/// The chat request is over (either way, stale or not): stop thinking and
/// consume the one-shot give-answer flag. Never touches `clear_pending`.
fn finish_request(app: &mut App) {
    app.is_thinking = false;
    app.give_answer_requested = false;
}

fn error_text(error: &BackendError) -> String {
    format!("Error: Could not connect to the backend. ({error})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Author;
    use crate::test_support::test_app;

    fn reply(text: &str, mode: &str) -> ChatResponse {
        ChatResponse {
            response: text.to_string(),
            mode: mode.to_string(),
        }
    }

    fn expect_send(effect: Effect) -> ChatRequest {
        match effect {
            Effect::SendChat(request) => request,
            other => panic!("expected SendChat, got {:?}", other),
        }
    }

    #[test]
    fn submit_appends_user_message_and_sends() {
        let mut app = test_app();
        let request = expect_send(update(&mut app, Action::Submit("What is recursion?".into())));

        assert_eq!(request.message, "What is recursion?");
        assert_eq!(request.mode, Mode::Reflection);
        assert!(!request.give_answer_requested);
        assert_eq!(request.session_id, app.session_id);

        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].author, Author::User);
        assert!(app.is_thinking);
    }

    #[test]
    fn submit_trims_input() {
        let mut app = test_app();
        let request = expect_send(update(&mut app, Action::Submit("  hello \n".into())));
        assert_eq!(request.message, "hello");
        assert_eq!(app.messages[0].text, "hello");
    }

    #[test]
    fn empty_submit_is_noop() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Submit("   ".into())), Effect::None);
        assert!(app.messages.is_empty());
        assert!(!app.is_thinking);
    }

    #[test]
    fn submit_while_thinking_is_ignored() {
        let mut app = test_app();
        expect_send(update(&mut app, Action::Submit("one".into())));
        assert_eq!(update(&mut app, Action::Submit("two".into())), Effect::None);
        assert_eq!(app.messages.len(), 1);
    }

    #[test]
    fn successful_reply_appends_one_bot_message_tagged_lowercase() {
        let mut app = test_app();
        expect_send(update(&mut app, Action::Submit("What is recursion?".into())));

        let session_id = app.session_id.clone();
        let effect = update(
            &mut app,
            Action::ResponseReceived {
                session_id,
                response: reply(
                    "Consider: what happens when a function calls itself?",
                    "Reflection",
                ),
            },
        );

        assert_eq!(effect, Effect::None);
        assert_eq!(app.messages.len(), 2);
        assert_eq!(app.messages[1].mode(), Some(Mode::Reflection));
        assert!(app.messages[1].text.starts_with("Consider"));
        assert!(app.messages[1].id > app.messages[0].id);
        assert!(!app.is_thinking);
    }

    #[test]
    fn unknown_reply_mode_falls_back_to_current_mode() {
        let mut app = test_app();
        app.mode = Mode::Answer;
        expect_send(update(&mut app, Action::Submit("q".into())));
        let session_id = app.session_id.clone();
        update(
            &mut app,
            Action::ResponseReceived {
                session_id,
                response: reply("a", "mystery"),
            },
        );
        assert_eq!(app.messages[1].mode(), Some(Mode::Answer));
    }

    #[test]
    fn api_error_renders_detail_as_bot_message() {
        let mut app = test_app();
        expect_send(update(&mut app, Action::Submit("q".into())));
        let session_id = app.session_id.clone();
        update(
            &mut app,
            Action::ResponseFailed {
                session_id,
                error: BackendError::Api {
                    status: 400,
                    detail: Some("Invalid mode specified.".into()),
                },
            },
        );

        assert_eq!(app.messages.len(), 2);
        let err = &app.messages[1];
        assert_eq!(err.mode(), Some(Mode::Answer));
        assert!(err.text.contains("Invalid mode specified."));
        assert!(!app.is_thinking);
    }

    #[test]
    fn api_error_without_detail_mentions_status() {
        let mut app = test_app();
        expect_send(update(&mut app, Action::Submit("q".into())));
        let session_id = app.session_id.clone();
        update(
            &mut app,
            Action::ResponseFailed {
                session_id,
                error: BackendError::Api {
                    status: 503,
                    detail: None,
                },
            },
        );
        assert!(app.messages[1].text.contains("HTTP error! status: 503"));
    }

    #[test]
    fn give_answer_flag_is_sent_once_then_reset_on_success() {
        let mut app = test_app();
        expect_send(update(&mut app, Action::Submit("What is recursion?".into())));
        let sid = app.session_id.clone();
        update(
            &mut app,
            Action::ResponseReceived {
                session_id: sid.clone(),
                response: reply("Think about it.", "reflection"),
            },
        );

        let request = expect_send(update(&mut app, Action::GiveAnswer(String::new())));
        assert!(request.give_answer_requested);
        assert_eq!(request.message, "");
        // Empty give-answer requests don't add a user bubble
        assert_eq!(app.messages.len(), 2);

        update(
            &mut app,
            Action::ResponseReceived {
                session_id: sid,
                response: reply("It is a function calling itself.", "reflection"),
            },
        );
        assert!(!app.give_answer_requested);

        let request = expect_send(update(&mut app, Action::Submit("thanks".into())));
        assert!(!request.give_answer_requested);
    }

    #[test]
    fn give_answer_flag_is_reset_on_failure() {
        let mut app = test_app();
        let id = app.next_id();
        app.messages.push(ChatMessage::user(id, "earlier"));

        let request = expect_send(update(&mut app, Action::GiveAnswer("please".into())));
        assert!(request.give_answer_requested);
        assert_eq!(request.message, "please");

        let session_id = app.session_id.clone();
        update(
            &mut app,
            Action::ResponseFailed {
                session_id,
                error: BackendError::Network("connection refused".into()),
            },
        );
        assert!(!app.give_answer_requested);
        assert!(!app.is_thinking);
    }

    #[test]
    fn give_answer_unavailable_in_answer_mode_or_empty_chat() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::GiveAnswer(String::new())), Effect::None);
        assert!(!app.give_answer_requested);

        let id = app.next_id();
        app.messages.push(ChatMessage::user(id, "earlier"));
        app.mode = Mode::Answer;
        assert_eq!(update(&mut app, Action::GiveAnswer(String::new())), Effect::None);
        assert!(!app.give_answer_requested);
    }

    fn answer(app: &mut App, session_id: SessionId, text: &str) {
        update(
            app,
            Action::ResponseReceived {
                session_id,
                response: reply(text, "reflection"),
            },
        );
    }

    #[test]
    fn clear_resets_even_when_server_fails() {
        let mut app = test_app();
        expect_send(update(&mut app, Action::Submit("hello".into())));
        let old_session = app.session_id.clone();
        answer(&mut app, old_session.clone(), "hi");

        let effect = update(&mut app, Action::ClearChat);
        assert_eq!(effect, Effect::ClearRemote(old_session.clone()));
        assert!(app.clear_pending);
        assert!(app.is_busy());

        update(
            &mut app,
            Action::ChatCleared(Err(BackendError::Network("connection refused".into()))),
        );
        assert!(app.messages.is_empty());
        assert_ne!(app.session_id, old_session);
        assert!(!app.is_busy());
        assert!(!app.give_answer_requested);
        assert!(app.status_message.contains("server history may remain"));
    }

    #[test]
    fn clear_resets_on_success() {
        let mut app = test_app();
        expect_send(update(&mut app, Action::Submit("hello".into())));
        let old_session = app.session_id.clone();
        update(&mut app, Action::ClearChat);
        update(&mut app, Action::ChatCleared(Ok(())));
        assert!(app.messages.is_empty());
        assert_ne!(app.session_id, old_session);
        assert!(!app.clear_pending);
    }

    #[test]
    fn second_clear_while_pending_is_ignored() {
        let mut app = test_app();
        assert!(matches!(update(&mut app, Action::ClearChat), Effect::ClearRemote(_)));
        assert_eq!(update(&mut app, Action::ClearChat), Effect::None);
    }

    #[test]
    fn reply_during_pending_clear_does_not_unblock_submit() {
        let mut app = test_app();
        expect_send(update(&mut app, Action::Submit("a".into())));
        let old_session = app.session_id.clone();
        update(&mut app, Action::ClearChat);

        // The chat reply lands first; the clear is still outstanding
        answer(&mut app, old_session.clone(), "reply to a");
        assert!(!app.is_thinking);
        assert!(app.clear_pending);
        assert_eq!(update(&mut app, Action::Submit("b".into())), Effect::None);
        assert_eq!(app.messages.len(), 2);

        update(&mut app, Action::ChatCleared(Ok(())));
        assert!(app.messages.is_empty());
        assert!(!app.is_busy());

        let request = expect_send(update(&mut app, Action::Submit("b".into())));
        assert_ne!(request.session_id, old_session);
        assert_eq!(request.session_id, app.session_id);
        assert_eq!(app.messages.len(), 1);
    }

    #[test]
    fn chat_in_flight_across_clear_keeps_one_request_at_a_time() {
        let mut app = test_app();
        expect_send(update(&mut app, Action::Submit("a".into())));
        let old_session = app.session_id.clone();
        update(&mut app, Action::ClearChat);
        update(&mut app, Action::ChatCleared(Ok(())));

        // The old /chat request has not answered yet
        assert!(app.is_thinking);
        assert_eq!(update(&mut app, Action::Submit("b".into())), Effect::None);

        answer(&mut app, old_session, "late");
        assert!(app.messages.is_empty());
        assert!(!app.is_busy());
        expect_send(update(&mut app, Action::Submit("b".into())));
        assert_eq!(app.messages.len(), 1);
    }

    #[test]
    fn reply_for_cleared_session_is_dropped() {
        let mut app = test_app();
        expect_send(update(&mut app, Action::Submit("hello".into())));
        let old_session = app.session_id.clone();
        update(&mut app, Action::ClearChat);
        update(&mut app, Action::ChatCleared(Ok(())));

        answer(&mut app, old_session, "late");
        assert!(app.messages.is_empty());
        assert!(!app.is_thinking);
    }

    #[test]
    fn mode_changes() {
        let mut app = test_app();
        update(&mut app, Action::ToggleMode);
        assert_eq!(app.mode, Mode::Answer);
        update(&mut app, Action::SetMode(Mode::Reflection));
        assert_eq!(app.mode, Mode::Reflection);

        update(&mut app, Action::SetMode(Mode::Answer));
        let request = expect_send(update(&mut app, Action::Submit("q".into())));
        assert_eq!(request.mode, Mode::Answer);
    }

    #[test]
    fn backend_status_sets_status_line() {
        let mut app = test_app();
        update(&mut app, Action::BackendStatus(Ok("hello".into())));
        assert!(app.status_message.starts_with("Connected"));
        update(
            &mut app,
            Action::BackendStatus(Err(BackendError::Network("refused".into()))),
        );
        assert!(app.status_message.starts_with("Backend unreachable"));
    }

    #[test]
    fn quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
