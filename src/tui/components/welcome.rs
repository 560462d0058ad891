//! # Welcome Screen
//!
//! Shown in place of the message list while the conversation is empty:
//! brand, tagline and four feature cards. Cards sit in one row of four on
//! wide terminals and in a 2×2 grid otherwise.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::core::mode::Mode;
use crate::tui::component::Component;
use crate::tui::components::header::BRAND;
use crate::tui::palette;

pub const TAGLINE: &str = "Fire up the Neurons in your Brain";

pub struct Card {
    pub title: &'static str,
    pub body: &'static str,
    pub color: Color,
}

pub fn cards() -> [Card; 4] {
    [
        Card {
            title: "Reflection Mode",
            body: "Guides you to think through complex topics with questions.",
            color: palette::mode_color(Mode::Reflection),
        },
        Card {
            title: "Answer Mode",
            body: "Provides direct, concise answers to your questions.",
            color: palette::mode_color(Mode::Answer),
        },
        Card {
            title: "Get Help with LeetCode",
            body: "Help me with this leetcode problem...",
            color: Color::Green,
        },
        Card {
            title: "Devise a Learning Plan",
            body: "Help me devise a learning plan for...",
            color: Color::Yellow,
        },
    ]
}

const CARD_HEIGHT: u16 = 6;
/// Below this width the cards wrap into two columns.
const WIDE_LAYOUT_MIN: u16 = 100;

pub struct Welcome;

impl Welcome {
    fn columns(width: u16) -> usize {
        if width >= WIDE_LAYOUT_MIN { 4 } else { 2 }
    }

    fn render_card(frame: &mut Frame, card: &Card, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(card.color))
            .padding(Padding::horizontal(1));
        let text = vec![
            Line::from(Span::styled(
                card.title,
                Style::default().fg(card.color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(card.body, palette::muted())),
        ];
        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
            area,
        );
    }
}

impl Component for Welcome {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let columns = Self::columns(area.width);
        let card_rows = 4u16.div_ceil(columns as u16);

        let [title_area, _, cards_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(card_rows * CARD_HEIGHT),
        ])
        .flex(Flex::Center)
        .areas(area);

        let title = vec![
            Line::from(Span::styled(
                BRAND,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(TAGLINE, palette::muted())),
        ];
        frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), title_area);

        let rows = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); card_rows as usize])
            .split(cards_area);
        let cards = cards();
        for (row_area, row_cards) in rows.iter().zip(cards.chunks(columns)) {
            let cells = Layout::horizontal(vec![Constraint::Max(32); columns])
                .flex(Flex::Center)
                .spacing(1)
                .split(*row_area);
            for (cell, card) in cells.iter().zip(row_cards) {
                Self::render_card(frame, card, *cell);
            }
        }
    }
}
