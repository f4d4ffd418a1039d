//! Ratatui widgets for the xmljson TUI.

pub mod command_bar;
pub mod file_bar;
pub mod help;
pub mod result_panel;
pub mod status_line;
