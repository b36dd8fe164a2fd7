//! Analyzer configuration
//!
//! [`AnalyzerConfig::default`] holds the built-in settings; the command line
//! overrides individual fields.

use crate::parser::parse::ParseTrace;

/// Which analysis to run over each file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Tokenize only and print the token table
    Lexical,
    /// Parse and print the AST table
    #[default]
    Syntax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub mode: Mode,
    /// Log `Begin: <Rule>` / `End: <Rule>` for every grammar rule
    pub trace_procedures: bool,
    /// Log every token as the parser consumes it
    pub trace_tokens: bool,
    /// Print the AST table after a successful syntax scan
    pub display_ast: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Syntax,
            trace_procedures: false,
            trace_tokens: false,
            display_ast: true,
        }
    }
}

impl AnalyzerConfig {
    pub fn parse_trace(&self) -> ParseTrace {
        ParseTrace {
            procedures: self.trace_procedures,
            tokens: self.trace_tokens,
        }
    }

    /// Whether any diagnostic tracing is switched on.
    pub fn is_tracing(&self) -> bool {
        self.trace_procedures || self.trace_tokens
    }
}
