//! Result panel — the scrollable, syntax-coloured view of the batch output.
//!
//! # Scroll semantics
//!
//! `offset` is the index of the first visible line (0 = top). Unlike a
//! live-tail log view, new output always starts at the top, so loading a
//! fresh batch resets the offset.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ResultPanelState {
    lines: Vec<String>,
    pub offset: usize,
    /// Cached from the last render so `handle()` can clamp to the viewport.
    last_height: Cell<usize>,
}

impl Default for ResultPanelState {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            offset: 0,
            last_height: Cell::new(40),
        }
    }
}

impl ResultPanelState {
    /// Replace the displayed text. `None` clears the panel.
    pub fn set_output(&mut self, output: Option<&str>) {
        self.lines = output
            .map(|text| text.lines().map(str::to_string).collect())
            .unwrap_or_default();
        self.offset = 0;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height())
    }

    pub fn handle(&mut self, event: &AppEvent) {
        if self.lines.is_empty() {
            return;
        }
        let max = self.max_offset();
        self.offset = match event {
            AppEvent::Nav(Direction::Up) => self.offset.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => (self.offset + 1).min(max),
            AppEvent::ScrollUp => self.offset.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => (self.offset + PAGE_STEP).min(max),
            AppEvent::ScrollToTop => 0,
            AppEvent::ScrollToBottom => max,
            _ => return,
        };
        tracing::trace!(offset = self.offset, max, "results: scrolled");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultPanel<'a> {
    state: &'a ResultPanelState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultPanel<'a> {
    pub fn new(state: &'a ResultPanelState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title(" Output ").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        self.state.last_height.set(height);

        let total = self.state.lines.len();
        if total == 0 {
            Paragraph::new(Line::from(Span::styled(
                "No output yet. Press : and type `load <file.xml>` to convert.",
                self.theme.status_info,
            )))
            .render(inner, buf);
            return;
        }

        let start = self.state.offset.min(total.saturating_sub(1));
        let end = (start + height).min(total);
        let lines: Vec<Line<'static>> = self.state.lines[start..end]
            .iter()
            .map(|l| highlight_json_line(l, self.theme))
            .collect();

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        if total > height {
            let mut sb_state = ScrollbarState::new(total)
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Line rendering
// ---------------------------------------------------------------------------

/// Colour one line of pretty-printed JSON.
///
/// Works line by line, which is enough for `serde_json`'s pretty output: a
/// string token never spans lines there. A string that follows an `"error"`
/// key gets the error style.
pub fn highlight_json_line(line: &str, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = line.char_indices().peekable();
    let mut after_error_key = false;

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                let mut end = line.len();
                let mut escaped = false;
                for (j, d) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if d == '\\' {
                        escaped = true;
                    } else if d == '"' {
                        end = j + 1;
                        break;
                    }
                }
                let token = &line[i..end];
                let is_key = line[end..].trim_start().starts_with(':');
                let style = if is_key {
                    after_error_key = token == "\"error\"";
                    theme.json_key
                } else if after_error_key {
                    theme.json_error
                } else {
                    theme.json_string
                };
                spans.push(Span::styled(token.to_string(), style));
            }
            '{' | '}' | '[' | ']' | ',' | ':' => {
                spans.push(Span::styled(c.to_string(), theme.json_punctuation));
            }
            c if c.is_whitespace() => {
                let mut end = i + c.len_utf8();
                while let Some(&(j, d)) = chars.peek() {
                    if !d.is_whitespace() {
                        break;
                    }
                    end = j + d.len_utf8();
                    chars.next();
                }
                spans.push(Span::raw(line[i..end].to_string()));
            }
            _ => {
                // Numbers, booleans, null.
                let mut end = i + c.len_utf8();
                while let Some(&(j, d)) = chars.peek() {
                    if d.is_whitespace() || matches!(d, ',' | '}' | ']') {
                        break;
                    }
                    end = j + d.len_utf8();
                    chars.next();
                }
                spans.push(Span::styled(line[i..end].to_string(), theme.json_scalar));
            }
        }
    }

    Line::from(spans)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
