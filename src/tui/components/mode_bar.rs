//! # ModeBar Component
//!
//! Bottom row: the two mode chips, the "Give me the answer" trigger and a
//! short description of the active mode.
//!
//! ```text
//!  [◆ Reflection] [■ Answer]  [Give me the answer ^G]      Reflection mode: Guiding ...
//! ```
//!
//! The trigger chip only appears when the reducer would accept it: reflection
//! mode, a non-empty conversation and nothing pending. While a give-answer
//! request is in flight it stays visible but dimmed.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::mode::Mode;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::palette;

pub const GIVE_ANSWER_LABEL: &str = "Give me the answer ^G";

/// How the trigger chip is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveAnswerChip {
    Hidden,
    Active,
    Pending,
}

impl GiveAnswerChip {
    pub fn for_app(app: &App) -> Self {
        if app.mode != Mode::Reflection || app.messages.is_empty() || app.clear_pending {
            Self::Hidden
        } else if app.give_answer_requested {
            Self::Pending
        } else if app.is_thinking {
            Self::Hidden
        } else {
            Self::Active
        }
    }
}

pub struct ModeBar {
    pub mode: Mode,
    pub give_answer: GiveAnswerChip,
}

impl ModeBar {
    pub fn new(mode: Mode, give_answer: GiveAnswerChip) -> Self {
        Self { mode, give_answer }
    }

    fn mode_chip(&self, mode: Mode) -> Span<'static> {
        let text = format!(" {} {} ", palette::mode_icon(mode), mode.label());
        if mode == self.mode {
            Span::styled(
                text,
                Style::default()
                    .fg(Color::Black)
                    .bg(palette::mode_color(mode))
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(text, palette::muted())
        }
    }

    fn chips(&self) -> Line<'static> {
        let mut spans = vec![
            self.mode_chip(Mode::Reflection),
            Span::raw(" "),
            self.mode_chip(Mode::Answer),
        ];
        match self.give_answer {
            GiveAnswerChip::Hidden => {}
            GiveAnswerChip::Active => {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    format!(" {GIVE_ANSWER_LABEL} "),
                    Style::default()
                        .fg(palette::GIVE_ANSWER)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            GiveAnswerChip::Pending => {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    format!(" {GIVE_ANSWER_LABEL} "),
                    palette::muted().add_modifier(Modifier::DIM),
                ));
            }
        }
        spans.push(Span::styled("  Tab switches mode", palette::muted()));
        Line::from(spans)
    }
}

impl Component for ModeBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chips = self.chips();
        let chips_width = chips.width() as u16;
        let [left, right] =
            Layout::horizontal([Constraint::Length(chips_width), Constraint::Min(0)]).areas(area);

        frame.render_widget(chips, left);

        let description = self.mode.description();
        if (description.width() as u16) < right.width {
            frame.render_widget(
                Paragraph::new(Span::styled(description, palette::muted()))
                    .alignment(Alignment::Right),
                right,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(bar: &mut ModeBar, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 1)).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn chip_hidden_on_empty_conversation() {
        let app = test_app();
        assert_eq!(GiveAnswerChip::for_app(&app), GiveAnswerChip::Hidden);
    }

    #[test]
    fn chip_lifecycle_follows_app_state() {
        let mut app = test_app();
        update(&mut app, Action::Submit("What is recursion?".into()));
        // Thinking, not a give-answer request
        assert_eq!(GiveAnswerChip::for_app(&app), GiveAnswerChip::Hidden);

        app.is_thinking = false;
        assert_eq!(GiveAnswerChip::for_app(&app), GiveAnswerChip::Active);

        update(&mut app, Action::GiveAnswer(String::new()));
        assert_eq!(GiveAnswerChip::for_app(&app), GiveAnswerChip::Pending);

        app.mode = Mode::Answer;
        assert_eq!(GiveAnswerChip::for_app(&app), GiveAnswerChip::Hidden);
    }

    #[test]
    fn chip_hidden_while_clearing() {
        let mut app = test_app();
        update(&mut app, Action::Submit("What is recursion?".into()));
        app.is_thinking = false;
        update(&mut app, Action::ClearChat);
        assert_eq!(GiveAnswerChip::for_app(&app), GiveAnswerChip::Hidden);
    }

    #[test]
    fn renders_modes_and_description() {
        let mut bar = ModeBar::new(Mode::Reflection, GiveAnswerChip::Hidden);
        let text = draw(&mut bar, 140);
        assert!(text.contains("Reflection"));
        assert!(text.contains("Answer"));
        assert!(text.contains(Mode::Reflection.description()));
        assert!(!text.contains(GIVE_ANSWER_LABEL));
    }

    #[test]
    fn renders_give_answer_chip_when_active() {
        let mut bar = ModeBar::new(Mode::Reflection, GiveAnswerChip::Active);
        let text = draw(&mut bar, 140);
        assert!(text.contains(GIVE_ANSWER_LABEL));
    }

    #[test]
    fn narrow_terminal_drops_description() {
        let mut bar = ModeBar::new(Mode::Answer, GiveAnswerChip::Hidden);
        let text = draw(&mut bar, 50);
        assert!(!text.contains("Direct answers"));
    }
}
