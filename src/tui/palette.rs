//! Shared colors. Reflection is purple, answer is blue, everything the
//! user owns is plain white on black.

use ratatui::style::{Color, Modifier, Style};

use crate::core::mode::Mode;

pub const MUTED: Color = Color::DarkGray;
pub const USER: Color = Color::White;
pub const GIVE_ANSWER: Color = Color::Cyan;

pub fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Reflection => Color::Magenta,
        Mode::Answer => Color::Blue,
    }
}

/// Glyph standing in for the brain / speech-bubble icons.
pub fn mode_icon(mode: Mode) -> &'static str {
    match mode {
        Mode::Reflection => "◆",
        Mode::Answer => "■",
    }
}

/// Bold colored label like `◆ REFLECTION`.
pub fn mode_tag_style(mode: Mode) -> Style {
    Style::default()
        .fg(mode_color(mode))
        .add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}
