//! Status line — the last action's outcome, on the bottom row.

use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, text::Span, widgets::Widget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub text: String,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Info, text: text.into() }
    }

    pub fn ok(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Ok, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: StatusLevel::Error, text: text.into() }
    }
}

pub struct StatusLine<'a> {
    status: &'a Status,
    theme: &'a Theme,
}

impl<'a> StatusLine<'a> {
    pub fn new(status: &'a Status, theme: &'a Theme) -> Self {
        Self { status, theme }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = match self.status.level {
            StatusLevel::Info => self.theme.status_info,
            StatusLevel::Ok => self.theme.status_ok,
            StatusLevel::Error => self.theme.status_error,
        };
        let span = Span::styled(format!(" {}", self.status.text), style);
        buf.set_span(area.x, area.y, &span, area.width);
    }
}
