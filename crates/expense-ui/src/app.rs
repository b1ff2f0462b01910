//! Main application state and TUI event loop for the expense dashboard.
//!
//! [`App`] owns the theme, the upload manager and the interactive state
//! (prompt input and month scroll).  Key handling is separate from the
//! terminal loop so it can be driven directly in tests.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::Text,
    widgets::Paragraph,
    Frame, Terminal,
};

use expense_core::models::{PipelineOptions, PipelineOutput};
use expense_core::ExpenseError;
use expense_runtime::{UploadManager, UploadState};

use crate::components::{Header, MetricCard};
use crate::themes::Theme;
use crate::{monthly_view, top_view, upload_view};

// ── InputMode ─────────────────────────────────────────────────────────────────

/// Whether keystrokes drive the dashboard or edit the upload path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the expense dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub manager: UploadManager,
    pub input_mode: InputMode,
    /// Text typed into the upload prompt.
    pub input: String,
    /// First visible row of the month grid.
    pub scroll: usize,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, options: PipelineOptions) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            manager: UploadManager::new(options),
            input_mode: InputMode::Normal,
            input: String::new(),
            scroll: 0,
            should_quit: false,
        }
    }

    /// Upload a file and reset the month scroll.
    pub fn upload(&mut self, path: &str) {
        tracing::debug!(path, "upload requested");
        self.manager.upload_path(path);
        self.scroll = 0;
    }

    pub fn state(&self) -> &UploadState {
        self.manager.state()
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout; the pipeline runs
    /// synchronously on this thread whenever an upload is submitted.
    pub fn run(mut self) -> expense_core::Result<()> {
        self.run_terminal().map_err(terminal_error)
    }

    fn run_terminal(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key)
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Editing => self.handle_editing_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('u') | KeyCode::Char('U') => {
                self.input.clear();
                self.input_mode = InputMode::Editing;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.manager.reload().is_some() {
                    self.scroll = self.scroll.min(self.max_scroll());
                }
            }
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let path = std::mem::take(&mut self.input);
                self.input_mode = InputMode::Normal;
                self.upload(&path);
            }
            KeyCode::Esc => {
                self.input.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn max_scroll(&self) -> usize {
        self.state()
            .output()
            .map(|o| monthly_view::max_scroll(&o.monthly))
            .unwrap_or(0)
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [header_area, status_area, body] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(frame.area());

        let header = Header::new(self.state().source(), &self.theme);
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

        let input = match self.input_mode {
            InputMode::Editing => Some(self.input.as_str()),
            InputMode::Normal => None,
        };
        let loaded = self.state().output().map(|o| &o.report);
        upload_view::render_status_line(frame, status_area, input, loaded, &self.theme);

        match self.state() {
            UploadState::Idle => upload_view::render_required_format(frame, body, &self.theme),
            UploadState::Failed { message, .. } => {
                let height = upload_view::error_banner_height(message, body.width);
                let [banner, help] =
                    Layout::vertical([Constraint::Length(height), Constraint::Min(0)]).areas(body);
                upload_view::render_error_banner(frame, banner, message, &self.theme);
                upload_view::render_required_format(frame, help, &self.theme);
            }
            UploadState::Empty { report, .. } => {
                upload_view::render_empty_state(frame, body, report, &self.theme)
            }
            UploadState::Ready { output, .. } => self.render_dashboard(frame, body, output),
        }
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect, output: &PipelineOutput) {
        let [cards, months, top] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(monthly_view::panel_height(&output.monthly).saturating_add(2)),
            Constraint::Length(top_view::required_height(&output.top_n).max(5)),
        ])
        .areas(area);

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(cards);
        MetricCard::total_spent(&output.kpis, &self.theme).render(frame, left);
        MetricCard::top_category(&output.kpis, &self.theme).render(frame, right);

        monthly_view::render_monthly_view(frame, months, &output.monthly, self.scroll, &self.theme);
        top_view::render_top_view(frame, top, &output.top_n, &self.theme);
    }
}

fn terminal_error(err: io::Error) -> ExpenseError {
    ExpenseError::Terminal(err.to_string())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
