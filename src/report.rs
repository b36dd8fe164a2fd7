//! Analysis drivers and console reports
//!
//! [`analyze`] runs the lexer (and, in syntax mode, the parser) over one
//! source text and keeps everything it produced in an [`Analysis`]. The
//! `write_*` functions render an analysis as the fixed-width tables printed
//! on stdout; [`run_file`] ties both together for one file on disk.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::config::{AnalyzerConfig, Mode};
use crate::parser::ast::{AstTree, NodeRow};
use crate::parser::lexer::{LexError, Lexer, Token};
use crate::parser::parse::{ParseError, Parser};

/// Verdict printed at the end of a syntax scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted => f.write_str("TRUE"),
            Outcome::Rejected => f.write_str("FALSE"),
        }
    }
}

/// Everything one scan produced
#[derive(Debug, Clone)]
pub struct Analysis {
    pub mode: Mode,
    pub source: String,
    /// Tokens up to end-of-text or the first lexical error. Only a lexical
    /// scan fills these; a syntax scan pulls its tokens through the parser.
    pub tokens: Vec<Token>,
    pub lex_error: Option<LexError>,
    /// Empty unless a syntax scan succeeded
    pub tree: AstTree,
    /// The error that ended the scan, if any
    pub error: Option<ParseError>,
}

impl Analysis {
    pub fn outcome(&self) -> Outcome {
        if self.error.is_some() {
            Outcome::Rejected
        } else {
            Outcome::Accepted
        }
    }
}

/// Lex `source` to the end, keeping the tokens produced before a failure.
pub fn collect_tokens(source: &str) -> (Vec<Token>, Option<LexError>) {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        match lexer.advance() {
            Ok(token) => {
                let done = token.is_end();
                tokens.push(token);
                if done {
                    return (tokens, None);
                }
            }
            Err(err) => return (tokens, Some(err)),
        }
    }
}

/// Run the configured analysis over `source`.
pub fn analyze(source: impl Into<String>, config: &AnalyzerConfig) -> Analysis {
    let source = source.into();

    let (tokens, lex_error, tree, error) = match config.mode {
        Mode::Lexical => {
            let (tokens, lex_error) = collect_tokens(&source);
            let error = lex_error.clone().map(ParseError::from);
            (tokens, lex_error, AstTree::new(), error)
        }
        Mode::Syntax => {
            let parsed = Parser::new(&source).and_then(|parser| parser.with_trace(config.parse_trace()).parse_program());
            match parsed {
                Ok(tree) => (Vec::new(), None, tree, None),
                Err(err) => (Vec::new(), None, AstTree::new(), Some(err)),
            }
        }
    };

    debug!(
        mode = ?config.mode,
        tokens = tokens.len(),
        nodes = tree.root().map_or(0, |root| root.node_count()),
        failed = error.is_some(),
        "analysis finished"
    );

    Analysis {
        mode: config.mode,
        source,
        tokens,
        lex_error,
        tree,
        error,
    }
}

/// Read, analyze and report one file.
///
/// Returns `None` when the file cannot be read; the failure is reported on
/// `out` in the same way as the other outcomes.
pub fn run_file<W: Write>(out: &mut W, path: &Path, config: &AnalyzerConfig) -> io::Result<Option<Analysis>> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read source file");
            writeln!(out, "Error: File not found.")?;
            return Ok(None);
        }
    };

    let analysis = analyze(source, config);
    write_report(out, &path.display().to_string(), &analysis, config)?;
    Ok(Some(analysis))
}

/// Render `analysis` the way its mode prints it.
pub fn write_report<W: Write>(out: &mut W, name: &str, analysis: &Analysis, config: &AnalyzerConfig) -> io::Result<()> {
    match analysis.mode {
        Mode::Lexical => write_lexical(out, name, analysis),
        Mode::Syntax => write_syntax(out, name, analysis, config.display_ast),
    }
}

pub fn write_lexical<W: Write>(out: &mut W, name: &str, analysis: &Analysis) -> io::Result<()> {
    writeln!(out, "Starting lexical analysis scan on '{}'...", name)?;
    writeln!(out, "{}", token_row("Position", "Kind", "Value"))?;

    for token in &analysis.tokens {
        writeln!(
            out,
            "{}",
            token_row(&token.position.to_string(), token.kind.as_str(), &token.value)
        )?;
    }

    match &analysis.lex_error {
        Some(err) => write_error(out, err),
        None => writeln!(out, "Lexical scan completed successfully.\n"),
    }
}

pub fn write_syntax<W: Write>(out: &mut W, name: &str, analysis: &Analysis, display_ast: bool) -> io::Result<()> {
    writeln!(out, "Starting syntax analysis scan on '{}'...", name)?;

    match &analysis.error {
        Some(err) => write_error(out, err)?,
        None => {
            writeln!(out, "Syntax scan completed successfully.\n")?;
            if display_ast {
                writeln!(out, "Abstract Syntax Tree (Using In-Order Traversal):")?;
                writeln!(out, "{}", node_row("KIND", "POS", ["CHILD0", "CHILD1", "CHILD2"]))?;
                for row in analysis.tree.rows() {
                    writeln!(out, "{}", format_node_row(&row))?;
                }
            }
        }
    }

    write_outcome(out, analysis.outcome())
}

fn write_error<W: Write>(out: &mut W, err: &dyn std::error::Error) -> io::Result<()> {
    writeln!(out, "Error: {}", err)?;
    writeln!(out, "Task ended due to error.\n")
}

fn write_outcome<W: Write>(out: &mut W, outcome: Outcome) -> io::Result<()> {
    writeln!(out, "\n\n   {}\n\n", outcome)
}

fn token_row(position: &str, kind: &str, value: &str) -> String {
    format!("{:<9}{:<9}{:<8}", position, kind, value)
}

fn node_row(kind: &str, position: &str, children: [&str; 3]) -> String {
    format!(
        "{:<13}{:<8}{:<13}{:<13}{:<13}",
        kind, position, children[0], children[1], children[2]
    )
}

/// One AST table line.
pub fn format_node_row(row: &NodeRow) -> String {
    node_row(
        &row.kind,
        &row.position.to_string(),
        [&row.children[0], &row.children[1], &row.children[2]],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::TokenKind;

    fn lexical() -> AnalyzerConfig {
        AnalyzerConfig {
            mode: Mode::Lexical,
            ..AnalyzerConfig::default()
        }
    }

    #[test]
    fn test_collect_tokens_stops_at_first_error() {
        let (tokens, err) = collect_tokens("x := 1 ? y");

        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Id, TokenKind::Assign, TokenKind::Num]);
        assert!(matches!(err, Some(LexError::IllegalSymbol { symbol: '?', .. })));
    }

    #[test]
    fn test_lexical_mode_skips_parsing() {
        // Not a program, but every character is a valid token
        let analysis = analyze("end program :=", &lexical());

        assert_eq!(analysis.outcome(), Outcome::Accepted);
        assert!(analysis.tree.is_empty());
        assert_eq!(analysis.tokens.len(), 4);
    }

    #[test]
    fn test_syntax_mode_lexes_once_through_parser() {
        let analysis = analyze("program p : print 1 end", &AnalyzerConfig::default());

        assert_eq!(analysis.outcome(), Outcome::Accepted);
        assert!(analysis.tokens.is_empty());
        assert_eq!(analysis.tree.rows().len(), 3);
    }

    #[test]
    fn test_syntax_error_is_the_only_error() {
        // The parser stops at `5`; the `?` further on is never lexed
        let analysis = analyze("program p : 5 ?", &AnalyzerConfig::default());

        assert!(analysis.lex_error.is_none());
        assert_eq!(
            analysis.error.as_ref().map(ToString::to_string),
            Some("at 1:13, Expected {ID, if, while, print}, but found 'NUM'".to_string())
        );
    }

    #[test]
    fn test_token_row_widths() {
        assert_eq!(token_row("1:1", "program", ""), "1:1      program          ");
        assert_eq!(token_row("1:9", "ID", "p"), "1:9      ID       p       ");
    }

    #[test]
    fn test_node_row_widths() {
        let row = node_row("SEQ", "1:19", ["DECL", "SEQ", "NIL"]);
        assert_eq!(
            row,
            "SEQ          1:19    DECL         SEQ          NIL          "
        );
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Accepted.to_string(), "TRUE");
        assert_eq!(Outcome::Rejected.to_string(), "FALSE");
    }
}
