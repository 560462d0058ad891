use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    Quit,
    Submit,
    NewChat,     // Ctrl+N, the header's "+" button
    ToggleMode,  // Tab
    GiveAnswer,  // Ctrl+G

    // Editing (handled by InputBox)
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,

    // Scrolling (handled by MessageList)
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToBottom,

    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    if !matches!(event::poll(timeout), Ok(true)) {
        return None;
    }
    match event::read() {
        Ok(ev) => translate(ev),
        Err(e) => {
            log::warn!("Failed to read terminal event: {}", e);
            None
        }
    }
}

fn translate(ev: Event) -> Option<TuiEvent> {
    match ev {
        Event::Key(key_event) => {
            // Keyboard enhancement reports releases too; only act on presses
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
                (KeyModifiers::CONTROL, KeyCode::Char('n')) => Some(TuiEvent::NewChat),
                (KeyModifiers::CONTROL, KeyCode::Char('g')) => Some(TuiEvent::GiveAnswer),
                // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
                (KeyModifiers::CONTROL, KeyCode::Char('j')) => Some(TuiEvent::InputChar('\n')),
                (m, KeyCode::Enter)
                    if m.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
                {
                    Some(TuiEvent::InputChar('\n'))
                }
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Tab) | (_, KeyCode::BackTab) => Some(TuiEvent::ToggleMode),
                (_, KeyCode::Esc) => Some(TuiEvent::Quit),
                (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
                    Some(TuiEvent::InputChar(c))
                }
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Delete) => Some(TuiEvent::Delete),
                (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
                (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (KeyModifiers::CONTROL, KeyCode::End) => Some(TuiEvent::ScrollToBottom),
                (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
                (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
                (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn enter_submits_and_shift_enter_inserts_newline() {
        assert_eq!(
            translate(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(TuiEvent::Submit)
        );
        assert_eq!(
            translate(key(KeyCode::Enter, KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('\n'))
        );
        assert_eq!(
            translate(key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Some(TuiEvent::InputChar('\n'))
        );
    }

    #[test]
    fn control_shortcuts() {
        assert_eq!(
            translate(key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            Some(TuiEvent::NewChat)
        );
        assert_eq!(
            translate(key(KeyCode::Char('g'), KeyModifiers::CONTROL)),
            Some(TuiEvent::GiveAnswer)
        );
        assert_eq!(
            translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Quit)
        );
        assert_eq!(
            translate(key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(TuiEvent::ToggleMode)
        );
    }

    #[test]
    fn plain_characters_are_input() {
        assert_eq!(
            translate(key(KeyCode::Char('n'), KeyModifiers::NONE)),
            Some(TuiEvent::InputChar('n'))
        );
        assert_eq!(
            translate(key(KeyCode::Char('N'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('N'))
        );
    }

    #[test]
    fn paste_and_resize() {
        assert_eq!(
            translate(Event::Paste("a\nb".into())),
            Some(TuiEvent::Paste("a\nb".into()))
        );
        assert_eq!(translate(Event::Resize(80, 24)), Some(TuiEvent::Resize));
    }
}
