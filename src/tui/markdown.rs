//! Markdown → ratatui `Text` renderer for chat bubbles.
//!
//! Walks `pulldown_cmark` events and builds styled lines: headings, bold,
//! italic, strikethrough, inline code, fenced code blocks (syntect
//! highlighting when the language is known), lists, blockquotes, rules and
//! links. Anything else (HTML, tables, images) is dropped.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::tui::palette::MUTED;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME: LazyLock<Option<Theme>> = LazyLock::new(|| {
    ThemeSet::load_defaults()
        .themes
        .remove("base16-ocean.dark")
});

/// Render markdown into owned `Text`, with `base` as the paragraph style.
pub fn render(content: &str, base: Style) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut builder = TextBuilder::new(base);
    for event in Parser::new_ext(content, opts) {
        builder.event(event);
    }
    builder.finish()
}

/// Code block currently being collected.
enum CodeBlock {
    Highlighted(HighlightLines<'static>),
    Plain,
}

struct TextBuilder {
    base: Style,
    lines: Vec<Line<'static>>,
    /// Inline styles; each entry already includes its parent.
    style_stack: Vec<Style>,
    /// Prefix spans repeated at the start of every new line (`│ ` for quotes).
    prefixes: Vec<Span<'static>>,
    /// One entry per open list: next number for ordered lists.
    lists: Vec<Option<u64>>,
    code: Option<CodeBlock>,
    pending_link: Option<String>,
    /// A block just ended; the next block gets a blank line before it.
    gap: bool,
}

impl TextBuilder {
    fn new(base: Style) -> Self {
        Self {
            base,
            lines: Vec::new(),
            style_stack: Vec::new(),
            prefixes: Vec::new(),
            lists: Vec::new(),
            code: None,
            pending_link: None,
            gap: false,
        }
    }

    fn finish(self) -> Text<'static> {
        Text::from(self.lines)
    }

    fn current_style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or(self.base)
    }

    fn push_style(&mut self, overlay: Style) {
        let style = self.current_style().patch(overlay);
        self.style_stack.push(style);
    }

    fn new_line(&mut self) {
        self.lines.push(Line::from(self.prefixes.clone()));
    }

    fn span(&mut self, span: Span<'static>) {
        if self.lines.is_empty() {
            self.new_line();
        }
        if let Some(line) = self.lines.last_mut() {
            line.push_span(span);
        }
    }

    fn start_block(&mut self) {
        if self.gap && !self.lines.is_empty() {
            self.new_line();
        }
        self.gap = false;
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                self.span(Span::styled(
                    code.to_string(),
                    Style::default().fg(Color::White).bg(MUTED),
                ));
            }
            Event::SoftBreak => self.span(Span::raw(" ")),
            Event::HardBreak => self.new_line(),
            Event::Rule => {
                self.start_block();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(24),
                    Style::default().fg(MUTED),
                )));
                self.gap = true;
            }
            Event::TaskListMarker(done) => {
                self.span(Span::raw(if done { "[x] " } else { "[ ] " }));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.start_block();
                // List items already opened their own line
                if !self.in_fresh_item() {
                    self.new_line();
                }
            }
            Tag::Heading { level, .. } => {
                self.start_block();
                self.new_line();
                let style = heading_style(self.base, level);
                self.push_style(style);
            }
            Tag::BlockQuote(_) => {
                self.start_block();
                self.prefixes
                    .push(Span::styled("│ ", Style::default().fg(MUTED)));
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.start_block();
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                let border = Style::default().fg(MUTED);
                let mut top = vec![Span::styled("╭──", border)];
                if !lang.is_empty() {
                    top.push(Span::styled(
                        format!(" {lang} "),
                        border.add_modifier(Modifier::BOLD),
                    ));
                }
                self.lines.push(Line::from(top));
                self.prefixes.push(Span::styled("│ ", border));

                let highlighter = SYNTAX_SET
                    .find_syntax_by_token(&lang)
                    .filter(|_| !lang.is_empty())
                    .zip((*THEME).as_ref())
                    .map(|(syntax, theme)| HighlightLines::new(syntax, theme));
                self.code = Some(match highlighter {
                    Some(h) => CodeBlock::Highlighted(h),
                    None => CodeBlock::Plain,
                });
            }
            Tag::List(first) => {
                if self.lists.is_empty() {
                    self.start_block();
                }
                self.lists.push(first);
            }
            Tag::Item => {
                self.new_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{indent}{n}. ");
                        *n += 1;
                        m
                    }
                    _ => format!("{indent}• "),
                };
                self.span(Span::styled(marker, Style::default().fg(MUTED)));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.pending_link = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.gap = true,
            TagEnd::Heading(_) => {
                self.style_stack.pop();
                self.gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.prefixes.pop();
                self.style_stack.pop();
                self.gap = true;
            }
            TagEnd::CodeBlock => {
                self.code = None;
                self.prefixes.pop();
                self.lines
                    .push(Line::from(Span::styled("╰──", Style::default().fg(MUTED))));
                self.gap = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.gap = true;
            }
            TagEnd::Item => self.gap = false,
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.style_stack.pop();
            }
            TagEnd::Link => {
                self.style_stack.pop();
                if let Some(url) = self.pending_link.take() {
                    self.span(Span::styled(
                        format!(" <{url}>"),
                        Style::default().fg(MUTED),
                    ));
                }
            }
            _ => {}
        }
    }

    /// True right after a list marker, where a tight/loose paragraph should
    /// continue the marker's line instead of starting a new one.
    fn in_fresh_item(&self) -> bool {
        !self.lists.is_empty()
            && self
                .lines
                .last()
                .is_some_and(|line| line.spans.len() == self.prefixes.len() + 1)
    }

    fn text(&mut self, raw: &str) {
        // ratatui renders '\t' as zero-width
        let text = raw.replace('\t', "    ");

        match self.code.take() {
            Some(CodeBlock::Highlighted(mut hl)) => {
                for line in LinesWithEndings::from(&text) {
                    self.new_line();
                    match hl.highlight_line(line, &SYNTAX_SET) {
                        Ok(ranges) => {
                            for (style, piece) in ranges {
                                let piece = piece.trim_end_matches('\n');
                                if piece.is_empty() {
                                    continue;
                                }
                                let fg = Color::Rgb(
                                    style.foreground.r,
                                    style.foreground.g,
                                    style.foreground.b,
                                );
                                self.span(Span::styled(piece.to_string(), Style::default().fg(fg)));
                            }
                        }
                        Err(_) => self.span(Span::raw(line.trim_end_matches('\n').to_string())),
                    }
                }
                self.code = Some(CodeBlock::Highlighted(hl));
            }
            Some(CodeBlock::Plain) => {
                for line in text.lines() {
                    self.new_line();
                    self.span(Span::styled(line.to_string(), Style::default().fg(Color::White)));
                }
                self.code = Some(CodeBlock::Plain);
            }
            None => {
                let style = self.current_style();
                self.span(Span::styled(text, style));
            }
        }
    }
}

fn heading_style(base: Style, level: HeadingLevel) -> Style {
    let emphasis = match level {
        HeadingLevel::H1 => Modifier::BOLD | Modifier::UNDERLINED,
        HeadingLevel::H2 => Modifier::BOLD,
        _ => Modifier::BOLD | Modifier::ITALIC,
    };
    base.add_modifier(emphasis)
}
