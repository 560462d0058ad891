//! Placeholder bubble shown while a reply is pending.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::mode::Mode;
use crate::tui::palette;

pub struct ThinkingIndicator {
    /// Current global mode; the placeholder takes its color.
    pub mode: Mode,
    pub spinner_frame: usize,
}

impl ThinkingIndicator {
    pub const HEIGHT: u16 = 3;
    pub const WIDTH: u16 = 28;

    /// Three dots bouncing in turn, like the web client's animation.
    fn dots(&self) -> Vec<Span<'static>> {
        let lit = (self.spinner_frame / 3) % 3;
        (0..3)
            .map(|i| {
                let glyph = if i == lit { "●" } else { "•" };
                Span::styled(format!("{glyph} "), palette::muted())
            })
            .collect()
    }
}

impl Widget for ThinkingIndicator {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette::mode_color(self.mode)))
            .title(Span::styled(
                format!(
                    " {} {} ",
                    palette::mode_icon(self.mode),
                    self.mode.as_str().to_uppercase()
                ),
                palette::mode_tag_style(self.mode),
            ))
            .padding(Padding::horizontal(1));

        let mut spans = self.dots();
        spans.push(Span::styled("Thinking...", palette::muted()));
        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn renders_mode_and_label() {
        let mut terminal = Terminal::new(TestBackend::new(
            ThinkingIndicator::WIDTH,
            ThinkingIndicator::HEIGHT,
        ))
        .unwrap();
        terminal
            .draw(|f| {
                f.render_widget(
                    ThinkingIndicator {
                        mode: Mode::Answer,
                        spinner_frame: 0,
                    },
                    f.area(),
                )
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("ANSWER"));
        assert!(text.contains("Thinking..."));
    }

    #[test]
    fn one_dot_is_lit_per_frame() {
        for frame in 0..9 {
            let dots = ThinkingIndicator {
                mode: Mode::Reflection,
                spinner_frame: frame,
            }
            .dots();
            let lit = dots.iter().filter(|s| s.content.starts_with('●')).count();
            assert_eq!(lit, 1);
        }
    }
}
