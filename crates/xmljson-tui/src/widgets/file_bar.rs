//! File bar — the one-line strip at the top of the screen naming the current
//! selection.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Renders the selected file names, a busy marker while a batch is in
/// flight, and right-aligned keybinding hints.
pub struct FileBar<'a> {
    files: &'a [String],
    busy: bool,
    theme: &'a Theme,
}

impl<'a> FileBar<'a> {
    pub fn new(files: &'a [String], busy: bool, theme: &'a Theme) -> Self {
        Self { files, busy, theme }
    }
}

/// `a.xml, b.xml` with `-` shown as `stdin`.
fn selection_label(files: &[String]) -> String {
    if files.is_empty() {
        return "no files selected".to_string();
    }
    files
        .iter()
        .map(|f| if f == xmljson_sources::STDIN_ARG { "stdin" } else { f.as_str() })
        .collect::<Vec<_>>()
        .join(", ")
}

impl Widget for FileBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" xmljson ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(selection_label(self.files), self.theme.status_info),
        ];
        if self.busy {
            spans.push(Span::styled("  ⟳ converting…", self.theme.status_ok));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let hint = " :cmd  ?:help  q:quit ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
