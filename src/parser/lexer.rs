//! Lexer (tokenizer) for tinyfront source code
//!
//! Pulls characters from a [`CharSource`] and produces one positioned
//! [`Token`] per call to [`Lexer::advance`]. Whitespace and `//` line
//! comments are skipped and never emitted. The first lexical error poisons
//! the lexer: every later call returns the same error.

use super::ast::Position;
use super::source::CharSource;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::trace;

/// All token kinds produced by the lexer.
///
/// Keywords and symbols are identified by their literal text; `ID`, `NUM`
/// and `end-of-text` are synthetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Program,
    Bool,
    End,
    Int,
    If,
    Then,
    Else,
    Fi,
    While,
    Do,
    Od,
    Print,
    Or,
    And,
    Not,
    False,
    True,

    // Synthetic
    Id,
    Num,
    EndOfText,

    // Relational
    Lt,    // <
    EqLt,  // =<
    Eq,    // =
    NotEq, // !=
    GtEq,  // >=
    Gt,    // >

    // Arithmetic
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /

    // Punctuation
    LParen,    // (
    RParen,    // )
    Semicolon, // ;
    Colon,     // :
    Assign,    // :=
}

/// Reserved words, looked up once an identifier-shaped lexeme is complete
static KEYWORDS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    [
        TokenKind::Program,
        TokenKind::Bool,
        TokenKind::End,
        TokenKind::Int,
        TokenKind::If,
        TokenKind::Then,
        TokenKind::Else,
        TokenKind::Fi,
        TokenKind::While,
        TokenKind::Do,
        TokenKind::Od,
        TokenKind::Print,
        TokenKind::Or,
        TokenKind::And,
        TokenKind::Not,
        TokenKind::False,
        TokenKind::True,
    ]
    .into_iter()
    .map(|kind| (kind.as_str(), kind))
    .collect()
});

impl TokenKind {
    /// Canonical text of this kind, as printed in tables and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Program => "program",
            TokenKind::Bool => "bool",
            TokenKind::End => "end",
            TokenKind::Int => "int",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::Fi => "fi",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::Od => "od",
            TokenKind::Print => "print",
            TokenKind::Or => "or",
            TokenKind::And => "and",
            TokenKind::Not => "not",
            TokenKind::False => "false",
            TokenKind::True => "true",
            TokenKind::Id => "ID",
            TokenKind::Num => "NUM",
            TokenKind::EndOfText => "end-of-text",
            TokenKind::Lt => "<",
            TokenKind::EqLt => "=<",
            TokenKind::Eq => "=",
            TokenKind::NotEq => "!=",
            TokenKind::GtEq => ">=",
            TokenKind::Gt => ">",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Assign => ":=",
        }
    }

    /// Look up a reserved word.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        KEYWORDS.get(text).copied()
    }

    pub fn is_keyword(&self) -> bool {
        KEYWORDS.contains_key(self.as_str())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexeme with its kind and the position of its first character.
///
/// `value` is the literal text for `ID` and `NUM` and empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }

    /// Source text of the token: the value for `ID`/`NUM`, the canonical
    /// symbol otherwise, and nothing for end-of-text.
    pub fn text(&self) -> &str {
        match self.kind {
            TokenKind::Id | TokenKind::Num => &self.value,
            TokenKind::EndOfText => "",
            _ => self.kind.as_str(),
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfText
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that cannot start any token
    #[error("at {position}, Symbol '{symbol}' not allowed")]
    IllegalSymbol { symbol: char, position: Position },

    /// A character that starts no complete token on its own (`!`, `_`)
    #[error("at {position}, Illegal token: '{lexeme}', {hint}")]
    IllegalToken {
        lexeme: char,
        hint: &'static str,
        position: Position,
    },

    /// A read past the end of the character source
    #[error("at {position}, unexpected end of input")]
    ExhaustedInput { position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::IllegalSymbol { position, .. }
            | LexError::IllegalToken { position, .. }
            | LexError::ExhaustedInput { position } => *position,
        }
    }
}

/// Lexer over a [`CharSource`]
pub struct Lexer {
    source: CharSource,
    position: Position,
    current: Option<Token>,
    failed: Option<LexError>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self::from_source(CharSource::new(input))
    }

    pub fn from_source(source: CharSource) -> Self {
        Self {
            source,
            position: Position::start(),
            current: None,
            failed: None,
        }
    }

    /// The most recently produced token, if any.
    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Kind of the current token.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.current.as_ref().map(|token| token.kind)
    }

    /// Produce the next token and make it current.
    ///
    /// Once end-of-text is reached every further call yields end-of-text at
    /// the same position. Once an error is returned every further call
    /// returns it again.
    pub fn advance(&mut self) -> Result<Token, LexError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }

        match self.scan_token() {
            Ok(token) => {
                trace!(position = %token.position, kind = %token.kind, value = %token.value, "token");
                self.current = Some(token.clone());
                Ok(token)
            }
            Err(err) => {
                self.failed = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Tokenize the rest of the input, end-of-text included.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.advance()?;
            let done = token.is_end();
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        loop {
            self.skip_whitespace()?;

            if !self.source.has_next() {
                let position = Position::new(self.position.line, self.position.column + 1);
                return Ok(Token::new(TokenKind::EndOfText, "", position));
            }

            let ch = self.bump()?;
            let start = self.position;

            let token = match ch {
                c if c.is_ascii_alphabetic() => {
                    let text = self.scan_while(c, |c| c.is_ascii_alphanumeric() || c == '_')?;
                    match TokenKind::keyword(&text) {
                        Some(kind) => Token::new(kind, "", start),
                        None => Token::new(TokenKind::Id, text, start),
                    }
                }
                c if c.is_ascii_digit() => {
                    let digits = self.scan_while(c, |c| c.is_ascii_digit())?;
                    Token::new(TokenKind::Num, digits, start)
                }
                '/' => {
                    if self.source.peek() == Some('/') {
                        self.skip_line_comment();
                        continue;
                    }
                    Token::new(TokenKind::Slash, "", start)
                }
                '>' => {
                    let kind = if self.eat('=')? { TokenKind::GtEq } else { TokenKind::Gt };
                    Token::new(kind, "", start)
                }
                '=' => {
                    let kind = if self.eat('<')? { TokenKind::EqLt } else { TokenKind::Eq };
                    Token::new(kind, "", start)
                }
                ':' => {
                    let kind = if self.eat('=')? { TokenKind::Assign } else { TokenKind::Colon };
                    Token::new(kind, "", start)
                }
                '!' => {
                    if !self.eat('=')? {
                        return Err(LexError::IllegalToken {
                            lexeme: '!',
                            hint: "missing '='?",
                            position: start,
                        });
                    }
                    Token::new(TokenKind::NotEq, "", start)
                }
                '<' => Token::new(TokenKind::Lt, "", start),
                '+' => Token::new(TokenKind::Plus, "", start),
                '-' => Token::new(TokenKind::Minus, "", start),
                '*' => Token::new(TokenKind::Star, "", start),
                '(' => Token::new(TokenKind::LParen, "", start),
                ')' => Token::new(TokenKind::RParen, "", start),
                ';' => Token::new(TokenKind::Semicolon, "", start),
                '_' => {
                    return Err(LexError::IllegalToken {
                        lexeme: '_',
                        hint: "used in identifier?",
                        position: start,
                    });
                }
                _ => {
                    return Err(LexError::IllegalSymbol {
                        symbol: ch,
                        position: start,
                    });
                }
            };

            self.skip_whitespace()?;
            return Ok(token);
        }
    }

    /// Accumulate characters accepted by `accept` after `first`; the first
    /// rejected character is pushed back.
    fn scan_while(&mut self, first: char, accept: impl Fn(char) -> bool) -> Result<String, LexError> {
        let mut text = String::from(first);

        while self.source.has_next() {
            let ch = self.bump()?;
            if accept(ch) {
                text.push(ch);
            } else {
                self.unbump(ch);
                break;
            }
        }

        Ok(text)
    }

    /// Consume the next character only if it is `expected`.
    fn eat(&mut self, expected: char) -> Result<bool, LexError> {
        if self.source.peek() == Some(expected) {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Skip whitespace, tracking line breaks
    fn skip_whitespace(&mut self) -> Result<(), LexError> {
        while let Some(ch) = self.source.peek() {
            if !matches!(ch, ' ' | '\t' | '\r' | '\n') {
                break;
            }
            self.bump()?;
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 0;
            }
        }
        Ok(())
    }

    /// Skip the rest of a `//` comment line
    fn skip_line_comment(&mut self) {
        self.source.skip_rest_of_line();
        self.position.line += 1;
        self.position.column = 0;
    }

    /// Consume one character, advancing the column
    fn bump(&mut self) -> Result<char, LexError> {
        let ch = self.source.next().map_err(|_| LexError::ExhaustedInput {
            position: self.position,
        })?;
        self.position.column += 1;
        Ok(ch)
    }

    /// Return a character consumed by [`Lexer::bump`]
    fn unbump(&mut self, ch: char) {
        self.source.putback(ch);
        self.position.column -= 1;
    }
}
