//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent parser with one method per grammar rule:
//! - This module: Parser struct, token helpers, tracing and coordination
//! - `declarations`: `Program`, `Body`, `Declarations`, `Declaration`
//! - `statements`: `Statements` and the four statement forms
//! - `expressions`: `Expression`, `SimpleExpr`, `Term`, `Factor`, `Literal`
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Tokens are pulled from the [`Lexer`] on demand and the parser never looks
//! further ahead than the current token. The first error, lexical or
//! syntactic, is returned as a value and unwinds the whole descent.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer failed while the parser was pulling the next token
    #[error(transparent)]
    Lexical(#[from] LexError),

    /// The current token does not fit the production being parsed
    #[error("at {position}, {message}")]
    Syntax { message: String, position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lexical(err) => err.position(),
            ParseError::Syntax { position, .. } => *position,
        }
    }
}

/// Diagnostic tracing toggles; they never change the tree or the outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseTrace {
    /// Log `Begin: <Rule>` / `End: <Rule>` around every grammar rule
    pub procedures: bool,
    /// Log every token as the parser consumes it
    pub tokens: bool,
}

/// Recursive descent parser for tinyfront programs
///
/// The lexer's current token is the parser's only lookahead.
pub struct Parser {
    pub(crate) lexer: Lexer,
    pub(crate) trace: ParseTrace,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Self::from_lexer(Lexer::new(source))
    }

    /// Wrap a lexer, pulling the first token.
    pub fn from_lexer(mut lexer: Lexer) -> Result<Self, ParseError> {
        lexer.advance()?;
        Ok(Self {
            lexer,
            trace: ParseTrace::default(),
        })
    }

    pub fn with_trace(mut self, trace: ParseTrace) -> Self {
        self.trace = trace;
        self
    }

    /// Parse a whole program.
    pub fn parse_program(&mut self) -> Result<AstTree, ParseError> {
        self.program()
    }

    // ===== Helper methods =====

    // The lexer is primed in `from_lexer`, so it always has a current token;
    // the fallbacks below only describe an unprimed lexer.

    pub(crate) fn kind(&self) -> TokenKind {
        self.lexer.peek_kind().unwrap_or(TokenKind::EndOfText)
    }

    pub(crate) fn current_position(&self) -> Position {
        self.lexer.current().map_or_else(Position::start, |token| token.position)
    }

    pub(crate) fn check(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind())
    }

    /// Consume the current token and pull the next one from the lexer.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let consumed = self
            .lexer
            .current()
            .cloned()
            .unwrap_or_else(|| Token::new(TokenKind::EndOfText, "", Position::start()));
        self.lexer.advance()?;

        if self.trace.tokens {
            debug!(
                position = %consumed.position,
                kind = %consumed.kind,
                value = %consumed.value,
                "consumed token"
            );
        }

        Ok(consumed)
    }

    /// Consume the current token if its kind is one of `kinds`.
    pub(crate) fn expect(&mut self, kinds: &[TokenKind]) -> Result<Token, ParseError> {
        if self.check(kinds) {
            self.advance()
        } else {
            Err(self.error_expected(&format_expected(kinds)))
        }
    }

    /// Syntax error at the current token: `Expected <expected>, but found '<kind>'`.
    pub(crate) fn error_expected(&self, expected: &str) -> ParseError {
        ParseError::Syntax {
            message: format!("Expected {}, but found '{}'", expected, self.kind()),
            position: self.current_position(),
        }
    }

    /// Run one grammar rule, tracing its entry and successful exit.
    pub(crate) fn rule<T>(
        &mut self,
        name: &'static str,
        body: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.trace.procedures {
            debug!("Begin: {}", name);
        }

        let result = body(self);

        if self.trace.procedures && result.is_ok() {
            debug!("End: {}", name);
        }

        result
    }
}

/// Render an expected-kinds set as `{ a, b, c }`.
pub(crate) fn format_expected(kinds: &[TokenKind]) -> String {
    let names: Vec<&str> = kinds.iter().map(TokenKind::as_str).collect();
    format!("{{ {} }}", names.join(", "))
}
