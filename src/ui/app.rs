//! Main TUI application state and logic

use crate::layout::{compute, Assumptions, Computation, Overrides};
use crate::report::render_snippet;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Result,
    Table,
    Diagnostics,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> result -> table -> diagnostics)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Result,
            FocusedPane::Result => FocusedPane::Table,
            FocusedPane::Table => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Diagnostics,
            FocusedPane::Result => FocusedPane::Source,
            FocusedPane::Table => FocusedPane::Result,
            FocusedPane::Diagnostics => FocusedPane::Table,
        }
    }
}

/// The main application state
pub struct App {
    /// File the declarations were read from, if any (enables reload)
    pub source_path: Option<PathBuf>,

    /// The declaration text being measured
    pub source_code: String,

    /// Overrides used for the next computation
    pub overrides: Overrides,

    /// Result of the latest computation
    pub computation: Computation,

    /// Snippet rendered from `computation`
    pub snippet: String,

    /// Whether the snippet includes the `#[derive(Accounts)]` initializer
    pub with_initializer: bool,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub result_scroll: usize,
    pub table_scroll: usize,
    pub diagnostics_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app and run the first computation
    pub fn new(source_code: String, source_path: Option<PathBuf>, overrides: Overrides) -> Self {
        let computation = compute(&source_code, &overrides);
        let mut app = App {
            source_path,
            source_code,
            overrides,
            computation,
            snippet: String::new(),
            with_initializer: false,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            result_scroll: 0,
            table_scroll: 0,
            diagnostics_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        };
        app.refresh_snippet();
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Current assumptions after overrides
    pub fn assumptions(&self) -> Assumptions {
        self.overrides.assumptions()
    }

    /// Recompute everything from the current text and overrides
    pub fn recompute(&mut self) {
        self.computation = compute(&self.source_code, &self.overrides);
        self.refresh_snippet();
        self.status_message = format!("Computed {} bytes", self.computation.total_size);
    }

    fn refresh_snippet(&mut self) {
        self.snippet = render_snippet(&self.source_code, &self.computation, self.with_initializer);
    }

    /// Re-read the source file from disk
    pub fn reload(&mut self) {
        let Some(path) = self.source_path.clone() else {
            self.status_message = "Nothing to reload: input was not a file".to_string();
            return;
        };

        match fs::read_to_string(&path) {
            Ok(source) => {
                self.source_code = source;
                self.recompute();
                self.status_message = format!(
                    "Reloaded {}: {} bytes",
                    path.display(),
                    self.computation.total_size
                );
            }
            Err(e) => {
                self.status_message = format!("Cannot reload {}: {}", path.display(), e);
            }
        }
    }

    /// Change the assumed `Vec<T>` length by `delta`, never below zero
    pub fn adjust_sequence_length(&mut self, delta: isize) {
        let current = self.assumptions().sequence_length;
        self.overrides.sequence_length = Some(current.saturating_add_signed(delta));
        self.recompute();
        self.status_message = format!(
            "Vec length {} → {} bytes",
            self.assumptions().sequence_length,
            self.computation.total_size
        );
    }

    /// Change the assumed `String` length by `delta`, never below zero
    pub fn adjust_string_length(&mut self, delta: isize) {
        let current = self.assumptions().string_length;
        self.overrides.string_length = Some(current.saturating_add_signed(delta));
        self.recompute();
        self.status_message = format!(
            "String length {} → {} bytes",
            self.assumptions().string_length,
            self.computation.total_size
        );
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Diagnostics (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Result (top) | Table (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            &self.computation.diagnostics,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_diagnostics_pane(
            frame,
            left_rows[1],
            &self.computation.diagnostics,
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        super::panes::render_result_pane(
            frame,
            right_rows[0],
            &self.computation,
            &self.snippet,
            self.focused_pane == FocusedPane::Result,
            &mut self.result_scroll,
        );

        super::panes::render_table_pane(
            frame,
            right_rows[1],
            &self.computation,
            self.focused_pane == FocusedPane::Table,
            &mut self.table_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            &self.computation,
        );
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Result => &mut self.result_scroll,
            FocusedPane::Table => &mut self.table_scroll,
            FocusedPane::Diagnostics => &mut self.diagnostics_scroll,
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                // Clamped against the content height on the next render
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(10);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_sequence_length(1),
            KeyCode::Char('-') => self.adjust_sequence_length(-1),
            KeyCode::Char(']') => self.adjust_string_length(1),
            KeyCode::Char('[') => self.adjust_string_length(-1),
            KeyCode::Char('0') => {
                self.overrides.sequence_length = None;
                self.overrides.string_length = None;
                self.recompute();
                self.status_message = "Assumptions reset to defaults".to_string();
            }
            KeyCode::Char('i') => {
                self.with_initializer = !self.with_initializer;
                self.refresh_snippet();
                self.status_message = if self.with_initializer {
                    "Showing account initializer".to_string()
                } else {
                    "Hiding account initializer".to_string()
                };
            }
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_adjusting_assumptions_recomputes() {
        let mut app = App::new(
            "pub struct A { keys: Vec<Pubkey>, name: String }".to_string(),
            None,
            Overrides::default(),
        );
        // Both fields share one line, which is not a field line
        assert_eq!(app.computation.total_size, 0);

        let mut app = App::new(
            "pub struct A {\n keys: Vec<Pubkey>,\n name: String,\n}".to_string(),
            None,
            Overrides::default(),
        );
        assert_eq!(app.computation.total_size, 324 + 5);

        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.computation.total_size, 4 + 32 * 9 + 5);

        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.computation.total_size, 4 + 32 * 9 + 6);

        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.computation.total_size, 324 + 5);
    }

    #[test]
    fn test_lengths_do_not_go_negative() {
        let mut app = App::new(String::new(), None, Overrides::default().with_string_length(0));
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.assumptions().string_length, 0);
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = App::new(String::new(), None, Overrides::default());
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Diagnostics);
    }

    #[test]
    fn test_toggle_initializer() {
        let mut app = App::new("pub struct A {\n a: u8,\n}".to_string(), None, Overrides::default());
        assert!(!app.snippet.contains("InitializeA"));
        press(&mut app, KeyCode::Char('i'));
        assert!(app.snippet.contains("InitializeA"));
    }
}
