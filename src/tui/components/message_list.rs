//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Lay out message bubbles (user on the right, assistant on the left)
//! - Show the thinking placeholder under the last message
//! - Follow the newest message unless the user scrolled away
//! - Cache bubble heights so long conversations stay cheap to draw
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice
//! (props). `render` mutates the layout cache and scroll state, in the
//! spirit of ratatui's `StatefulWidget`.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::ChatMessage;
use crate::core::mode::Mode;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::components::thinking::ThinkingIndicator;
use crate::tui::event::TuiEvent;

/// Blank rows between consecutive bubbles.
const GAP: u16 = 1;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Total canvas height from the last frame
    pub content_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::default(),
            stick_to_bottom: true,
            viewport_height: 0,
            content_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user is back at the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        if self.scroll_state.offset().y >= self.max_offset() {
            self.stick_to_bottom = true;
            self.clamp_scroll();
        }
    }

    /// True when content exists below the visible window.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [ChatMessage],
    pub is_thinking: bool,
    /// Global mode, used to color the thinking placeholder.
    pub mode: Mode,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [ChatMessage],
        is_thinking: bool,
        mode: Mode,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            is_thinking,
            mode,
            spinner_frame,
        }
    }
}

/// Bubbles take 80% of the width, but never less than 20 columns when the
/// terminal allows it.
pub fn bubble_width(content_width: u16) -> u16 {
    let preferred = (content_width as u32 * 4 / 5) as u16;
    preferred.max(content_width.min(20))
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let bubble_w = bubble_width(content_width);

        // 1. Bring the height cache up to date
        self.state.layout.sync(self.messages, bubble_w);

        let messages_height = self.state.layout.total();
        let thinking_height = if self.is_thinking {
            ThinkingIndicator::HEIGHT + GAP
        } else {
            0
        };
        let canvas_height = messages_height + thinking_height;

        // 2. Clamp scroll offset against the new content size
        self.state.viewport_height = area.height;
        self.state.content_height = canvas_height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible bubbles into the scroll canvas
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in visible {
            let message = &self.messages[i];
            let top = self.state.layout.top_of(i);
            let height = self.state.layout.heights[i].saturating_sub(GAP);
            let x = if message.is_user() {
                content_width.saturating_sub(bubble_w)
            } else {
                0
            };
            scroll_view.render_widget(Message::new(message), Rect::new(x, top, bubble_w, height));
        }

        if self.is_thinking {
            let width = ThinkingIndicator::WIDTH.min(content_width);
            scroll_view.render_widget(
                ThinkingIndicator {
                    mode: self.mode,
                    spinner_frame: self.spinner_frame,
                },
                Rect::new(0, messages_height, width, ThinkingIndicator::HEIGHT),
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on the state: `MessageList` itself is rebuilt every
/// frame and cannot hold the scroll position.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached bubble heights (gap included), keyed by message id.
///
/// Messages never change after creation, so an entry stays valid until the
/// width changes or the message at that index is a different one (chat
/// cleared).
#[derive(Default)]
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    ids: Vec<u64>,
    width: u16,
}

impl LayoutCache {
    /// Number of leading entries still valid for `messages` at `width`.
    pub fn reusable_count(&self, messages: &[ChatMessage], width: u16) -> usize {
        if width != self.width {
            return 0;
        }
        self.ids
            .iter()
            .zip(messages)
            .take_while(|(id, msg)| **id == msg.id)
            .count()
    }

    pub fn sync(&mut self, messages: &[ChatMessage], width: u16) {
        let reusable = self.reusable_count(messages, width);
        if reusable == messages.len() && reusable == self.heights.len() {
            return;
        }

        self.heights.truncate(reusable);
        self.ids.truncate(reusable);
        for msg in &messages[reusable..] {
            self.heights.push(Message::calculate_height(msg, width) + GAP);
            self.ids.push(msg.id);
        }
        self.width = width;
        self.rebuild_prefix_heights();
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    pub fn top_of(&self, index: usize) -> u16 {
        if index == 0 {
            0
        } else {
            self.prefix_heights[index - 1]
        }
    }

    /// Indices of messages overlapping the viewport, plus half a screen of
    /// slack on each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}
