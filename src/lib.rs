//! # Introduction
//!
//! tinyfront is the front end of a small imperative language: a lexer that
//! turns source text into positioned tokens and a recursive descent parser
//! that builds a three-slot abstract syntax tree. Results are printed as
//! fixed-width tables and can be browsed in a terminal viewer built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Analysis pipeline
//!
//! ```text
//! Source → CharSource → Lexer → Parser → AstTree → Report / Viewer
//! ```
//!
//! 1. [`parser`]: reads characters, tokenises them and builds the AST.
//! 2. [`report`]: runs a lexical or syntax scan and prints the token or
//!    node table. Syntax scans end with a `TRUE`/`FALSE` verdict.
//! 3. [`config`] / [`cli`]: built-in defaults and their command line
//!    overrides.
//! 4. [`ui`]: ratatui-based viewer; not part of the stable library API.
//!
//! ## Language
//!
//! ```text
//! program demo :
//!     int n ;
//!     bool done ;
//!     n := 0 ;
//!     while not (n >= 3) do
//!         print n ;
//!         n := n + 1
//!     od
//! end
//! ```
//!
//! Types: `int`, `bool`. Statements: `:=`, `if/then/else/fi`,
//! `while/do/od`, `print`. Comments run from `//` to the end of the line.

pub mod cli;
pub mod config;
pub mod parser;
pub mod report;
pub mod ui;
