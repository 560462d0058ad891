//! # Header Component
//!
//! Top bar: brand on the left; status, session and the new-chat hint on the
//! right.
//!
//! Purely presentational. All props come from the parent:
//! - `status_message`: core App state (connection result, clear-chat outcome)
//! - `session_id`: core App state
//! - `has_unseen_content`: TUI scroll state
//!
//! When the terminal is too narrow the right side is dropped piece by piece,
//! hint first, so the status stays readable.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::palette;

pub const BRAND: &str = "#ProjectThinkk";

pub struct Header {
    pub status_message: String,
    pub session_short: String,
    pub has_unseen_content: bool,
}

impl Header {
    pub fn new(status_message: String, session_short: String, has_unseen_content: bool) -> Self {
        Self {
            status_message,
            session_short,
            has_unseen_content,
        }
    }

    /// Right-hand segments in priority order.
    fn segments(&self) -> Vec<Span<'static>> {
        let mut segments = Vec::new();
        if self.has_unseen_content {
            segments.push(Span::styled(
                "↓ New",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        if !self.status_message.is_empty() {
            segments.push(Span::raw(self.status_message.clone()));
        }
        segments.push(Span::styled(
            format!("session {}", self.session_short),
            palette::muted(),
        ));
        segments.push(Span::styled("^N New Chat", palette::muted()));
        segments
    }

    /// Joins as many segments as fit in `width`.
    fn right_line(&self, width: usize) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut used = 0;
        for segment in self.segments() {
            let sep = if spans.is_empty() { 0 } else { 3 };
            let w = segment.content.width();
            if used + sep + w > width {
                break;
            }
            if sep > 0 {
                spans.push(Span::styled(" │ ", palette::muted()));
            }
            used += sep + w;
            spans.push(segment);
        }
        Line::from(spans)
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let brand_width = BRAND.width() as u16 + 1;
        let [left, right] =
            Layout::horizontal([Constraint::Length(brand_width), Constraint::Min(0)]).areas(area);

        frame.render_widget(
            Span::styled(
                BRAND,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            left,
        );
        frame.render_widget(
            Paragraph::new(self.right_line(right.width as usize)).alignment(Alignment::Right),
            right,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(header: &mut Header, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 1)).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn shows_brand_status_session_and_hint() {
        let mut header = Header::new("New chat".into(), "abcd1234".into(), false);
        let text = draw(&mut header, 100);
        assert!(text.contains("#ProjectThinkk"));
        assert!(text.contains("New chat"));
        assert!(text.contains("session abcd1234"));
        assert!(text.contains("^N New Chat"));
        assert!(!text.contains("↓ New"));
    }

    #[test]
    fn unseen_indicator_shown() {
        let mut header = Header::new(String::new(), "abcd1234".into(), true);
        let text = draw(&mut header, 100);
        assert!(text.contains("↓ New"));
    }

    #[test]
    fn narrow_terminal_drops_trailing_segments() {
        let header = Header::new("Connected".into(), "abcd1234".into(), false);
        let line = header.right_line(12);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Connected");
    }
}
