//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (reply pending): draws every ~80ms so the thinking dots move.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize or when a
//!   background task reports back.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.
//!
//! ## Background Work
//!
//! Every backend call runs in its own tokio task and reports back as an
//! `Action` on a std channel drained once per loop iteration. Replies carry
//! the session id they were sent under so the reducer can drop late ones.

mod component;
mod components;
mod event;
pub mod markdown;
mod palette;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::backend::{ChatBackend, ChatRequest, HttpBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::session::SessionId;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }

    /// Mirror core state into component props. Called after every dispatch
    /// so events later in the same batch already see the new state.
    pub fn sync(&mut self, app: &App) {
        self.input_box.disabled = app.is_busy();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets us tell Shift+Enter from Enter; terminals
        // without it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn ChatBackend> = Arc::new(HttpBackend::new(Some(config.base_url.clone())));
    let mut app = App::new(backend, config.mode);
    let mut tui = TuiState::new();
    info!(
        "Starting session {} in {} mode against {}",
        app.session_id,
        app.mode,
        app.backend.describe()
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_ping(&app, tx.clone());

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'main: loop {
        if app.is_thinking {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if app.is_thinking {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event, &tx) {
                break 'main;
            }
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = dispatch(&mut app, action, &tx);
            tui.sync(&app);
            if effect == Effect::Quit {
                break 'main;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Route one terminal event. Returns true when the app should exit.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent, tx: &mpsc::Sender<Action>) -> bool {
    let quit = match event {
        TuiEvent::Resize => false,
        TuiEvent::Quit => dispatch(app, Action::Quit, tx) == Effect::Quit,
        TuiEvent::NewChat => {
            dispatch(app, Action::ClearChat, tx);
            false
        }
        TuiEvent::ToggleMode => {
            dispatch(app, Action::ToggleMode, tx);
            false
        }
        TuiEvent::GiveAnswer => {
            let text = tui.input_box.buffer.clone();
            if matches!(dispatch(app, Action::GiveAnswer(text), tx), Effect::SendChat(_)) {
                tui.input_box.take();
            }
            false
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            false
        }
        _ => {
            if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event)
                && matches!(dispatch(app, Action::Submit(text), tx), Effect::SendChat(_))
            {
                // Only an accepted submit empties the editor
                tui.input_box.take();
                tui.message_list.stick_to_bottom = true;
            }
            false
        }
    };
    tui.sync(app);
    quit
}

/// Run an action through the reducer and start whatever backend call it
/// asks for. The effect is handed back so callers can react to it.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> Effect {
    let effect = update(app, action);
    match &effect {
        Effect::SendChat(request) => spawn_chat(app, request.clone(), tx.clone()),
        Effect::ClearRemote(session_id) => spawn_clear(app, session_id.clone(), tx.clone()),
        Effect::None | Effect::Quit => {}
    }
    effect
}

fn send(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to deliver background result: receiver dropped");
    }
}

fn spawn_chat(app: &App, request: ChatRequest, tx: mpsc::Sender<Action>) {
    let backend = app.backend.clone();
    info!(
        "Spawning chat request (session={}, mode={})",
        request.session_id, request.mode
    );
    tokio::spawn(async move {
        let session_id = request.session_id.clone();
        let action = match backend.chat(&request).await {
            Ok(response) => Action::ResponseReceived {
                session_id,
                response,
            },
            Err(error) => Action::ResponseFailed { session_id, error },
        };
        send(&tx, action);
    });
}

fn spawn_clear(app: &App, session_id: SessionId, tx: mpsc::Sender<Action>) {
    let backend = app.backend.clone();
    info!("Spawning clear_chat for session {}", session_id);
    tokio::spawn(async move {
        let result = backend.clear_chat(&session_id).await;
        send(&tx, Action::ChatCleared(result));
    });
}

fn spawn_ping(app: &App, tx: mpsc::Sender<Action>) {
    let backend = app.backend.clone();
    tokio::spawn(async move {
        let result = backend.ping().await;
        send(&tx, Action::BackendStatus(result));
    });
}
