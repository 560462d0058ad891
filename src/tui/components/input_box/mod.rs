//! # InputBox Component
//!
//! Multi-line message editor at the bottom of the screen.
//!
//! ## Responsibilities
//!
//! - Capture text input, pastes and newlines (Shift+Enter, Ctrl+J)
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit `Submit` on Enter with a non-blank buffer. The text stays in the
//!   buffer until the caller calls `take()`, so a rejected submit loses nothing
//! - Grow with its content up to five rows, then scroll internally
//! - Refuse input while a request is pending (`disabled` prop)
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `disabled` is a prop mirrored
//! from `App::is_busy` by the event loop after every dispatched action.
//! Row layout lives in `editor`.

mod editor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette;

use editor::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, cursor_position, inner_width, line_end, line_start,
    move_vertically, next_char_boundary, prev_char_boundary, visual_rows,
};

pub const PLACEHOLDER: &str = "Ask a question...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed on a non-blank buffer. Carries a copy of the text.
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Prop: true while any backend request is outstanding.
    pub disabled: bool,
    /// Byte offset into `buffer`.
    cursor: usize,
    /// First visible row when content exceeds `MAX_VISIBLE_LINES`.
    scroll_offset: u16,
    /// Area width from the last render, used for vertical cursor moves.
    last_width: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            cursor: 0,
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Height needed for the current buffer at `area_width`, borders included.
    /// Between `1 + VERTICAL_OVERHEAD` and `MAX_VISIBLE_LINES + VERTICAL_OVERHEAD`.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let rows = visual_rows(&self.buffer, inner_width(area_width)).len() as u16;
        rows.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Empty the editor and return what was in it.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        self.scroll_offset = 0;
        std::mem::take(&mut self.buffer)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Keep the cursor row inside the visible window.
    fn update_scroll_offset(&mut self, total_rows: u16, cursor_row: u16) {
        let max_offset = total_rows.saturating_sub(MAX_VISIBLE_LINES);
        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_row + 1 - MAX_VISIBLE_LINES;
        }
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
        Some(InputEvent::ContentChanged)
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (pos != self.cursor).then(|| {
            self.cursor = pos;
            InputEvent::ContentChanged
        })
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.last_width = area.width;
        let width = inner_width(area.width);
        let rows = visual_rows(&self.buffer, width);
        let (cursor_row, cursor_col) = cursor_position(&self.buffer, self.cursor, width);
        self.update_scroll_offset(rows.len() as u16, cursor_row as u16);

        let border = if self.disabled {
            palette::muted()
        } else {
            Style::default().fg(Color::White)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);

        let lines: Vec<Line> = if self.buffer.is_empty() {
            vec![Line::from(Span::styled(PLACEHOLDER, palette::muted()))]
        } else {
            rows.iter()
                .skip(self.scroll_offset as usize)
                .take(MAX_VISIBLE_LINES as usize)
                .map(|r| Line::raw(&self.buffer[r.start..r.end]))
                .collect()
        };
        let text_style = if self.disabled {
            palette::muted()
        } else {
            Style::default().fg(palette::USER)
        };
        frame.render_widget(Paragraph::new(lines).style(text_style).block(block), area);

        if rows.len() as u16 > MAX_VISIBLE_LINES {
            // ScrollbarState content_length is the max scroll position
            let max_scroll = rows.len() - MAX_VISIBLE_LINES as usize;
            let mut state = ScrollbarState::default()
                .content_length(max_scroll)
                .position(self.scroll_offset as usize);
            let bar_area = Rect {
                x: area.x + area.width.saturating_sub(1),
                y: area.y + 1,
                width: 1,
                height: area.height.saturating_sub(2),
            };
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                bar_area,
                &mut state,
            );
        }

        if !self.disabled && inner.width > 0 && inner.height > 0 {
            let row = (cursor_row as u16).saturating_sub(self.scroll_offset);
            let x = (inner.x + cursor_col).min(area.right().saturating_sub(2));
            let y = (inner.y + row).min(inner.bottom().saturating_sub(1));
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => {
                // Terminals deliver pasted newlines as \r or \r\n
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert(&text)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => self.move_to(prev_char_boundary(&self.buffer, self.cursor)),
            TuiEvent::CursorRight => self.move_to(next_char_boundary(&self.buffer, self.cursor)),
            TuiEvent::CursorHome => self.move_to(line_start(&self.buffer, self.cursor)),
            TuiEvent::CursorEnd => self.move_to(line_end(&self.buffer, self.cursor)),
            TuiEvent::CursorUp | TuiEvent::CursorDown => {
                let width = inner_width(self.last_width);
                let up = matches!(event, TuiEvent::CursorUp);
                let pos = move_vertically(&self.buffer, self.cursor, width, up)?;
                self.move_to(pos)
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    None
                } else {
                    Some(InputEvent::Submit(self.buffer.clone()))
                }
            }
            _ => None,
        }
    }
}
