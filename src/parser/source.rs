//! Character source with pushback
//!
//! [`CharSource`] is the lexer's only view of the input: a forward-only
//! character stream with a LIFO pushback stack layered on top. The lexer
//! reads one character past the end of every identifier and number and
//! returns it with [`CharSource::putback`].

use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Returned by [`CharSource::next`] when no characters remain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("read past the end of input")]
pub struct ExhaustedInput;

/// Pushback-capable character reader over a file's contents
#[derive(Debug, Clone)]
pub struct CharSource {
    input: Vec<char>,
    position: usize,
    pushback: Vec<char>,
}

impl CharSource {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            pushback: Vec::new(),
        }
    }

    /// Read a whole file. The handle is closed before this returns.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::new(&contents))
    }

    pub fn has_next(&self) -> bool {
        !self.pushback.is_empty() || self.position < self.input.len()
    }

    /// Consume the next character, pushed-back characters first.
    pub fn next(&mut self) -> Result<char, ExhaustedInput> {
        if let Some(ch) = self.pushback.pop() {
            return Ok(ch);
        }

        let ch = *self.input.get(self.position).ok_or(ExhaustedInput)?;
        self.position += 1;
        Ok(ch)
    }

    /// Look at the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.pushback
            .last()
            .copied()
            .or_else(|| self.input.get(self.position).copied())
    }

    pub fn putback(&mut self, ch: char) {
        self.pushback.push(ch);
    }

    /// Drop any pushback and consume through the next `\n` (or to the end
    /// of input when the last line has no terminator).
    pub fn skip_rest_of_line(&mut self) {
        self.pushback.clear();
        while let Some(&ch) = self.input.get(self.position) {
            self.position += 1;
            if ch == '\n' {
                break;
            }
        }
    }
}
