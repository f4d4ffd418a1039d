//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Batches run on the
//! [`BatchRunner`]'s background runtime; finished ones are pulled in once per
//! frame by [`App::pump`] and handed to the [`Session`], which drops any that
//! were superseded by a reset or a newer selection.

use crate::{
    clipboard::Clipboard,
    commands::Command,
    event::{self, AppEvent},
    runner::BatchRunner,
    theme::Theme,
    widgets::{
        command_bar::{BarOutcome, CommandBar, CommandBarState},
        file_bar::FileBar,
        help::HelpPopup,
        result_panel::{ResultPanel, ResultPanelState},
        status_line::{Status, StatusLine},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{
    io::{self, IsTerminal},
    time::Duration,
};
use xmljson_core::{config::Config, session::BatchTicket, BatchOutput, CopyAction, Session};
use xmljson_sources::STDIN_ARG;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Results,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub session: Session,
    pub config: Config,
    pub theme: Theme,
    pub results: ResultPanelState,
    pub focus: Focus,
    pub command_bar: CommandBarState,
    pub show_help: bool,
    pub status: Status,
    /// Ticket of the batch currently running, if any.
    pub in_flight: Option<BatchTicket>,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    runner: BatchRunner,
    clipboard: Clipboard,
    /// Standard input is the terminal crossterm reads keys from.
    stdin_is_terminal: bool,
}

impl App {
    /// App wired to the system clipboard, with OSC 52 on stdout as fallback.
    pub fn new(config: Config, theme: Theme) -> anyhow::Result<Self> {
        Self::with_clipboard(
            config,
            theme,
            Clipboard::system_with_terminal_fallback(io::stdout()),
        )
    }

    pub fn with_clipboard(config: Config, theme: Theme, clipboard: Clipboard) -> anyhow::Result<Self> {
        let runner = BatchRunner::new(config.convert.options())?;
        let state = AppState {
            session: Session::from_config(&config),
            config,
            theme,
            results: ResultPanelState::default(),
            focus: Focus::Results,
            command_bar: CommandBarState::default(),
            show_help: false,
            status: Status::info("ready"),
            in_flight: None,
            quit: false,
        };
        Ok(App {
            state,
            runner,
            clipboard,
            stdin_is_terminal: io::stdin().is_terminal(),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Select `files` (paths or `-`) and start converting them.
    pub fn load(&mut self, files: Vec<String>) {
        if self.stdin_is_terminal && files.iter().any(|f| f == STDIN_ARG) {
            tracing::warn!("stdin requested while it is the terminal");
            self.state.status =
                Status::error("stdin is the terminal; pipe input in or name a file");
            return;
        }
        let count = files.len();
        match self.state.session.select(files.clone()) {
            Ok(ticket) => {
                tracing::info!(files = count, "starting batch");
                self.state.in_flight = Some(ticket);
                self.state.status = Status::info(format!("converting {count} file(s)…"));
                self.runner.start(ticket, files);
            }
            Err(err) => {
                tracing::warn!(error = %err, "selection rejected");
                self.state.status = Status::error(err.to_string());
            }
        }
    }

    /// Apply every batch that has finished since the last call. Returns
    /// whether any of them changed the output.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Some(done) = self.runner.poll() {
            let s = &mut self.state;
            if !s.session.complete(done.ticket, &done.output) {
                continue;
            }
            if s.in_flight == Some(done.ticket) {
                s.in_flight = None;
            }
            s.results.set_output(s.session.output());
            s.status = completion_status(&done.output);
            changed = true;
        }
        changed
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.pump();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if self.state.focus == Focus::Command {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.state.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.state.show_help = false;
            }
            return;
        }

        if self.state.focus == Focus::Command {
            if event == AppEvent::Quit {
                self.state.quit = true;
                return;
            }
            match self.state.command_bar.handle(&event) {
                BarOutcome::Editing => {}
                BarOutcome::Closed => self.state.focus = Focus::Results,
                BarOutcome::Run(cmd) => {
                    self.state.focus = Focus::Results;
                    self.execute(cmd);
                }
            }
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.state.quit = true;
            }
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.state.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!("entering command mode");
                self.state.command_bar.clear();
                self.state.focus = Focus::Command;
            }
            AppEvent::CopySchema => self.copy(CopyAction::Schema),
            AppEvent::CopyWithPrompt => self.copy(CopyAction::WithPrompt),
            AppEvent::Reset => self.reset(),
            AppEvent::ToggleResults => self.toggle_results(),
            AppEvent::Resize(_, _) => {}
            other if self.state.session.show_results() => self.state.results.handle(&other),
            _ => {}
        }
    }

    /// Execute a parsed [`Command`] against the application state.
    fn execute(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => self.state.quit = true,
            Command::Help => self.state.show_help = !self.state.show_help,
            Command::Theme(name) => {
                self.state.theme = Theme::by_name(&name);
                self.state.status = Status::info(format!("theme: {name}"));
            }
            Command::Load(files) => self.load(files),
            Command::Reset => self.reset(),
            Command::Copy => self.copy(CopyAction::Schema),
            Command::CopyPrompt => self.copy(CopyAction::WithPrompt),
            Command::Results => self.toggle_results(),
        }
    }

    fn copy(&mut self, action: CopyAction) {
        let s = &mut self.state;
        if !s.session.show_results() {
            s.status = Status::info("results are hidden; press v to show them before copying");
            return;
        }
        let Some(text) = s.session.copy_text(action) else {
            s.status = Status::info("nothing to copy yet");
            return;
        };
        s.status = match self.clipboard.copy(&text) {
            Ok(target) => {
                tracing::info!(?action, sink = target, bytes = text.len(), "copied output");
                match action {
                    CopyAction::Schema => Status::ok(format!("copied output to {target}")),
                    CopyAction::WithPrompt => {
                        Status::ok(format!("copied prompt and output to {target}"))
                    }
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "copy failed");
                Status::error(format!("copy failed: {err}"))
            }
        };
    }

    fn reset(&mut self) {
        let s = &mut self.state;
        s.session.reset();
        s.in_flight = None;
        s.results.set_output(None);
        s.status = Status::info("reset");
    }

    fn toggle_results(&mut self) {
        let s = &mut self.state;
        let show = !s.session.show_results();
        s.session.set_show_results(show);
        s.status = Status::info(if show { "results shown" } else { "results hidden" });
    }
}

fn completion_status(output: &BatchOutput) -> Status {
    match output {
        BatchOutput::Fault { detail, .. } => Status::error(format!("batch failed: {detail}")),
        BatchOutput::Results(results) => match output.failed_files() {
            0 => Status::ok(format!("converted {} file(s)", results.len())),
            failed => Status::error(format!(
                "converted {} file(s), {failed} failed",
                results.len()
            )),
        },
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line file bar | results | 1-line status
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        FileBar::new(state.session.selected(), state.in_flight.is_some(), &state.theme),
        vert[0],
    );
    if state.session.show_results() {
        frame.render_widget(
            ResultPanel::new(&state.results, state.focus == Focus::Results, &state.theme),
            vert[1],
        );
    }
    frame.render_widget(StatusLine::new(&state.status, &state.theme), vert[2]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the status row
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
