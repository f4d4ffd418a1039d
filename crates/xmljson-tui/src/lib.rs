//! xmljson TUI — ratatui application shell.

pub mod app;
pub mod clipboard;
pub mod commands;
pub mod event;
pub mod runner;
pub mod theme;
pub mod widgets;

pub use app::App;

/// Start the TUI, loading `initial_files` straight away when any are given.
pub fn run(config: xmljson_core::config::Config, initial_files: Vec<String>) -> anyhow::Result<()> {
    let theme = theme::Theme::load_default();
    let mut app = App::new(config, theme)?;
    if !initial_files.is_empty() {
        app.load(initial_files);
    }
    app.run()
}
