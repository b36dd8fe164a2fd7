//! tinyfront source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`source`]: Character input with pushback
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions and the tree builder
//!
//! # Supported Language
//!
//! - Types: `int`, `bool`
//! - Statements: assignment (`:=`), `if … then … else … fi`, `while … do … od`, `print`
//! - Expressions: relational, additive and multiplicative operators, `not`, parentheses
//! - Line comments start with `//`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per grammar rule.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod source;
mod statements;
