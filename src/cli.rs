//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::config::{AnalyzerConfig, Mode};

//-------------------------------------------------------------------------------------------------
// Types
//-------------------------------------------------------------------------------------------------

/// tinyfront runs lexical or syntax analysis over source files
#[derive(Debug, Parser)]
#[command(name = "tinyfront", author)]
pub struct TinyfrontArgs {
    /// Source files to analyze, in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Analysis to run
    #[arg(short = 'm', long, value_enum)]
    pub mode: Option<Mode>,

    /// Trace entry and exit of every grammar rule
    #[arg(long)]
    pub trace_procedures: bool,

    /// Trace every token the parser consumes
    #[arg(long)]
    pub trace_tokens: bool,

    /// Do not print the AST table
    #[arg(long)]
    pub no_ast: bool,

    /// Browse tokens and tree in a terminal viewer after each file
    #[arg(long)]
    pub view: bool,

    /// Enable verbose logging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

//-------------------------------------------------------------------------------------------------
// Methods
//-------------------------------------------------------------------------------------------------

impl TinyfrontArgs {
    /// Defaults overridden by whatever was given on the command line.
    pub fn config(&self) -> AnalyzerConfig {
        let defaults = AnalyzerConfig::default();
        AnalyzerConfig {
            mode: self.mode.unwrap_or(defaults.mode),
            trace_procedures: defaults.trace_procedures || self.trace_procedures,
            trace_tokens: defaults.trace_tokens || self.trace_tokens,
            display_ast: defaults.display_ast && !self.no_ast,
        }
    }
}
