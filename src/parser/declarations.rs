//! Program, body and declaration parsing
//!
//! # Grammar
//!
//! ```text
//! Program      ::= "program" ID ":" Body "end"
//! Body         ::= [ Declarations ] Statements
//! Declarations ::= Declaration { Declaration }
//! Declaration  ::= ("bool" | "int") ID ";"
//! ```
//!
//! Every declaration becomes `SEQ { DECL { name, type } }`. Further
//! declarations are spliced into the previous `SEQ`'s child1, and the body's
//! statements are spliced after the last declaration the same way.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

const TYPE_KEYWORDS: [TokenKind; 2] = [TokenKind::Bool, TokenKind::Int];

impl Parser {
    /// Parse `"program" ID ":" Body "end"`; the tree is the body's.
    ///
    /// Nothing after `end` is inspected.
    pub(crate) fn program(&mut self) -> Result<AstTree, ParseError> {
        self.rule("Program", |p| {
            p.expect(&[TokenKind::Program])?;
            p.expect(&[TokenKind::Id])?;
            p.expect(&[TokenKind::Colon])?;
            let body = p.body()?;
            p.expect(&[TokenKind::End])?;
            Ok(body)
        })
    }

    pub(crate) fn body(&mut self) -> Result<AstTree, ParseError> {
        self.rule("Body", |p| {
            let mut tree = if p.check(&TYPE_KEYWORDS) {
                p.declarations()?
            } else {
                AstTree::new()
            };

            tree.add_tree(p.statements()?);
            Ok(tree)
        })
    }

    pub(crate) fn declarations(&mut self) -> Result<AstTree, ParseError> {
        self.rule("Declarations", |p| {
            let mut tree = p.declaration()?;

            while p.check(&TYPE_KEYWORDS) {
                tree.add_tree(p.declaration()?);
            }

            Ok(tree)
        })
    }

    pub(crate) fn declaration(&mut self) -> Result<AstTree, ParseError> {
        self.rule("Declaration", |p| {
            let ty = p.expect(&TYPE_KEYWORDS)?;
            let id = p.expect(&[TokenKind::Id])?;
            let semicolon = p.expect(&[TokenKind::Semicolon])?;

            let decl = AstNode::new(NodeKind::Decl, ty.position)
                .with_child0(AstNode::leaf(id.value, id.position))
                .with_child1(AstNode::leaf(ty.kind.as_str(), ty.position));

            let mut tree = AstTree::new();
            tree.add(AstNode::new(NodeKind::Seq, semicolon.position).with_child0(decl));
            Ok(tree)
        })
    }
}
