use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Author, ChatMessage};
use crate::tui::markdown;
use crate::tui::palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Top + bottom borders plus the timestamp row.
const VERTICAL_OVERHEAD: u16 = 3;

/// A single chat bubble: mode tag in the border, markdown body, timestamp.
///
/// Transient: built each frame from a borrowed message. Heights are
/// predicted with the same `Paragraph` wrapping used for drawing, so the
/// parent `MessageList` can lay out its scroll canvas without rendering.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    /// Height of the bubble when drawn `width` columns wide.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row
            return 1;
        }
        let lines = body_paragraph(message).line_count(content_width) as u16;
        lines.max(1) + VERTICAL_OVERHEAD
    }
}

fn border_color(author: Author) -> Color {
    match author {
        Author::User => palette::USER,
        Author::Bot { mode } => palette::mode_color(mode),
    }
}

fn body_paragraph(message: &ChatMessage) -> Paragraph<'static> {
    let body: Text<'static> = markdown::render(message.text.trim(), Style::default().fg(Color::White));
    Paragraph::new(body).wrap(Wrap { trim: false })
}

fn title(author: Author) -> Line<'static> {
    match author {
        Author::User => Line::from(Span::styled(" you ", palette::muted())),
        Author::Bot { mode } => Line::from(Span::styled(
            format!(" {} {} ", palette::mode_icon(mode), mode.as_str().to_uppercase()),
            palette::mode_tag_style(mode),
        )),
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let author = self.message.author;
        let border = Style::default().fg(border_color(author));

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(title(author))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        block.render(area, buf);

        let [body_area, time_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        body_paragraph(self.message).render(body_area, buf);
        Paragraph::new(self.message.timestamp.as_str())
            .style(palette::muted())
            .alignment(Alignment::Right)
            .render(time_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mode::Mode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn single_line_height_includes_borders_and_timestamp() {
        let msg = ChatMessage::user(1, "Hello");
        assert_eq!(Message::calculate_height(&msg, 40), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn zero_width_returns_minimum() {
        let msg = ChatMessage::user(1, "Hello");
        assert_eq!(Message::calculate_height(&msg, 0), 1);
        assert_eq!(Message::calculate_height(&msg, HORIZONTAL_OVERHEAD), 1);
    }

    #[test]
    fn long_text_wraps() {
        let msg = ChatMessage::user(1, "Hello world");
        // content width 6 → "Hello" | "world"
        assert_eq!(
            Message::calculate_height(&msg, 6 + HORIZONTAL_OVERHEAD),
            2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn markdown_paragraphs_count_blank_separator() {
        let msg = ChatMessage::bot(1, "one\n\ntwo", Mode::Answer);
        assert_eq!(Message::calculate_height(&msg, 40), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn bot_bubble_shows_mode_tag_and_timestamp() {
        let msg = ChatMessage::bot(1, "Consider **this**", Mode::Reflection);
        let height = Message::calculate_height(&msg, 40);
        let mut terminal = Terminal::new(TestBackend::new(40, height)).unwrap();
        terminal
            .draw(|f| f.render_widget(Message::new(&msg), f.area()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("REFLECTION"));
        assert!(text.contains("Consider this"));
        assert!(text.contains(&msg.timestamp));
    }

    #[test]
    fn border_color_follows_author() {
        assert_eq!(border_color(Author::User), palette::USER);
        assert_eq!(
            border_color(Author::Bot { mode: Mode::Reflection }),
            Color::Magenta
        );
        assert_eq!(border_color(Author::Bot { mode: Mode::Answer }), Color::Blue);
    }
}
