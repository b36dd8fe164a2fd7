//! Viewer application state and logic

use crate::config::Mode;
use crate::parser::ast::NodeRow;
use crate::report::{collect_tokens, Analysis};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Tree => FocusedPane::Tokens,
        }
    }
}

/// The viewer state for one analyzed file
pub struct App {
    /// Display name of the file
    pub name: String,

    pub analysis: Analysis,

    /// In-order AST rows, computed once
    pub rows: Vec<NodeRow>,

    pub focused_pane: FocusedPane,

    /// Selected entry in the token and tree panes
    pub selected_token: usize,
    pub selected_node: usize,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub token_scroll: usize,
    pub tree_scroll: usize,

    pub should_quit: bool,
}

impl App {
    pub fn new(name: impl Into<String>, mut analysis: Analysis) -> Self {
        // A syntax scan keeps no token list; the token pane lexes its own
        if analysis.mode == Mode::Syntax && analysis.tokens.is_empty() {
            analysis.tokens = collect_tokens(&analysis.source).0;
        }
        let rows = analysis.tree.rows();
        App {
            name: name.into(),
            analysis,
            rows,
            focused_pane: FocusedPane::Tokens,
            selected_token: 0,
            selected_node: 0,
            source_scroll: 0,
            token_scroll: 0,
            tree_scroll: 0,
            should_quit: false,
        }
    }

    /// Run the event loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Source line of the selected token or tree node (1-based, 0 for none).
    ///
    /// The tree selection wins while the tree pane is focused.
    pub fn current_line(&self) -> usize {
        let node_line = self.rows.get(self.selected_node).map(|row| row.position.line);
        let token_line = self
            .analysis
            .tokens
            .get(self.selected_token)
            .map(|token| token.position.line);

        let line = match self.focused_pane {
            FocusedPane::Tree => node_line.or(token_line),
            _ => token_line.or(node_line),
        };
        line.unwrap_or(0)
    }

    /// Line of the error that ended the scan, if any.
    pub fn error_line(&self) -> Option<usize> {
        self.analysis.error.as_ref().map(|err| err.position().line)
    }

    /// Status bar text
    pub fn status_message(&self) -> String {
        match &self.analysis.error {
            Some(err) => format!("{}: {}", self.name, err),
            None => format!("{}: {} tokens, {} nodes", self.name, self.analysis.tokens.len(), self.rows.len()),
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Source (left) | Tokens (middle) | Tree (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(25),
                Constraint::Percentage(35),
            ])
            .split(main_chunks[0]);

        let current_line = self.current_line();
        let error_line = self.error_line();

        super::panes::render_source_pane(
            frame,
            columns[0],
            &self.analysis.source,
            current_line,
            error_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_token_pane(
            frame,
            columns[1],
            &self.analysis.tokens,
            self.selected_token,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.token_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            columns[2],
            &self.rows,
            self.selected_node,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message(),
            self.analysis.outcome(),
        );
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
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_sub(1);
                }
                FocusedPane::Tokens => {
                    self.selected_token = self.selected_token.saturating_sub(1);
                }
                FocusedPane::Tree => {
                    self.selected_node = self.selected_node.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_add(1);
                }
                FocusedPane::Tokens => {
                    if self.selected_token + 1 < self.analysis.tokens.len() {
                        self.selected_token += 1;
                    }
                }
                FocusedPane::Tree => {
                    if self.selected_node + 1 < self.rows.len() {
                        self.selected_node += 1;
                    }
                }
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::report::analyze;

    fn app(source: &str) -> App {
        App::new("test.tf", analyze(source, &AnalyzerConfig::default()))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::from(code));
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app("program p : print 1 end");
        assert_eq!(app.focused_pane, FocusedPane::Tokens);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app("program p : print 1 end");
        let last = app.analysis.tokens.len() - 1;

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_token, 0);

        for _ in 0..20 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selected_token, last);
    }

    #[test]
    fn test_current_line_follows_focused_selection() {
        let mut app = app("program p :\n  print 1\nend");

        // Token 0 is `program` on line 1
        assert_eq!(app.current_line(), 1);

        // First in-order row is the literal `1` on line 2
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_line(), 2);
    }

    #[test]
    fn test_error_line_and_status() {
        let app = app("program p :\nx ?= 5 end");

        assert_eq!(app.error_line(), Some(2));
        assert!(app.rows.is_empty());
        assert_eq!(app.status_message(), "test.tf: at 2:3, Symbol '?' not allowed");
    }

    #[test]
    fn test_syntax_scan_tokens_filled_for_viewer() {
        let app = app("program p : print 1 end");

        assert!(!app.analysis.tokens.is_empty());
        assert_eq!(app.status_message(), "test.tf: 7 tokens, 3 nodes");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app("program p : print 1 end");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
