//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! Statements  ::= Statement { ";" Statement }
//! Statement   ::= Assignment | Conditional | Iterative | Print
//! Assignment  ::= ID ":=" Expression
//! Conditional ::= "if" Expression "then" Body [ "else" Body ] "fi"
//! Iterative   ::= "while" Expression "do" Body "od"
//! Print       ::= "print" Expression
//! ```
//!
//! A statement sequence grows a `SEQ` spine: each `;` makes a new `SEQ` the
//! root with the statements so far as child0, and the next statement is
//! spliced into its child1.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    pub(crate) fn statements(&mut self) -> Result<AstTree, ParseError> {
        self.rule("Statements", |p| {
            let mut tree = p.statement()?;

            while p.check(&[TokenKind::Semicolon]) {
                let semicolon = p.advance()?;
                tree = tree.wrap(AstNode::new(NodeKind::Seq, semicolon.position));
                tree.add_tree(p.statement()?);
            }

            Ok(tree)
        })
    }

    /// Dispatch on the current token to one statement form.
    pub(crate) fn statement(&mut self) -> Result<AstTree, ParseError> {
        self.rule("Statement", |p| {
            let node = match p.kind() {
                TokenKind::Id => p.assignment()?,
                TokenKind::If => p.conditional()?,
                TokenKind::While => p.iterative()?,
                TokenKind::Print => p.print()?,
                _ => return Err(p.error_expected("{ID, if, while, print}")),
            };
            Ok(AstTree::from_node(node))
        })
    }

    /// `ASSIGNMENT { VARIABLE { name }, value }`
    pub(crate) fn assignment(&mut self) -> Result<AstNode, ParseError> {
        self.rule("AssignmentStatement", |p| {
            let id = p.expect(&[TokenKind::Id])?;
            let variable =
                AstNode::new(NodeKind::Variable, id.position).with_child0(AstNode::leaf(id.value, id.position));

            let assign = p.expect(&[TokenKind::Assign])?;
            let value = p.expression()?;

            Ok(AstNode::new(NodeKind::Assignment, assign.position)
                .with_child0(variable)
                .with_child1(value))
        })
    }

    /// `IF { condition, then-body, else-body? }`
    pub(crate) fn conditional(&mut self) -> Result<AstNode, ParseError> {
        self.rule("ConditionalStatement", |p| {
            let if_token = p.expect(&[TokenKind::If])?;
            let mut node = AstNode::new(NodeKind::If, if_token.position).with_child0(p.expression()?);

            p.expect(&[TokenKind::Then])?;
            node.child1 = p.body()?.into_root().map(Box::new);

            if p.check(&[TokenKind::Else]) {
                p.advance()?;
                node.child2 = p.body()?.into_root().map(Box::new);
            }

            p.expect(&[TokenKind::Fi])?;
            Ok(node)
        })
    }

    /// `WHILE { condition, body }`
    pub(crate) fn iterative(&mut self) -> Result<AstNode, ParseError> {
        self.rule("IterativeStatement", |p| {
            let while_token = p.expect(&[TokenKind::While])?;
            let mut node = AstNode::new(NodeKind::While, while_token.position).with_child0(p.expression()?);

            p.expect(&[TokenKind::Do])?;
            node.child1 = p.body()?.into_root().map(Box::new);
            p.expect(&[TokenKind::Od])?;

            Ok(node)
        })
    }

    /// `PRINT { value }`
    pub(crate) fn print(&mut self) -> Result<AstNode, ParseError> {
        self.rule("PrintStatement", |p| {
            let print_token = p.expect(&[TokenKind::Print])?;
            Ok(AstNode::new(NodeKind::Print, print_token.position).with_child0(p.expression()?))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> String {
        Parser::new(source)
            .unwrap()
            .parse_program()
            .unwrap()
            .root()
            .unwrap()
            .to_string()
    }

    fn parse_err(source: &str) -> String {
        Parser::new(source)
            .unwrap()
            .parse_program()
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn test_statement_sequence_shape() {
        // The first statement ends up deepest in the child0 spine
        assert_eq!(
            parse("program p : print 1 ; print 2 ; print 3 end"),
            "SEQ(SEQ(PRINT(INT_LITERAL(1)), PRINT(INT_LITERAL(2))), PRINT(INT_LITERAL(3)))"
        );
    }

    #[test]
    fn test_seq_positions_are_semicolons() {
        let tree = Parser::new("program p : print 1 ;\nprint 2 end")
            .unwrap()
            .parse_program()
            .unwrap();
        assert_eq!(tree.root().unwrap().position, Position::new(1, 21));
    }

    #[test]
    fn test_if_then_else() {
        assert_eq!(
            parse("program p : if x < 1 then y := 1 else y := 2 fi end"),
            "IF(OP_LT(VARIABLE(x), INT_LITERAL(1)), ASSIGNMENT(VARIABLE(y), INT_LITERAL(1)), ASSIGNMENT(VARIABLE(y), INT_LITERAL(2)))"
        );
    }

    #[test]
    fn test_if_without_else_leaves_child2_empty() {
        let tree = Parser::new("program p : if true then print 1 fi end")
            .unwrap()
            .parse_program()
            .unwrap();
        let node = tree.root().unwrap();

        assert_eq!(node.kind, NodeKind::If);
        assert_eq!(node.child_tag(Slot::Child2), "NIL");
        assert_eq!(node.to_string(), "IF(BOOL_LITERAL(true), PRINT(INT_LITERAL(1)))");
    }

    #[test]
    fn test_nested_body_with_declarations() {
        assert_eq!(
            parse("program p : while b do int i ; i := 0 ; print i od end"),
            "WHILE(VARIABLE(b), SEQ(DECL(i, int), SEQ(ASSIGNMENT(VARIABLE(i), INT_LITERAL(0)), PRINT(VARIABLE(i)))))"
        );
    }

    #[test]
    fn test_statement_after_compound_statement() {
        assert_eq!(
            parse("program p : if b then print 1 fi ; print 2 end"),
            "SEQ(IF(VARIABLE(b), PRINT(INT_LITERAL(1))), PRINT(INT_LITERAL(2)))"
        );
    }

    #[test]
    fn test_assignment_positions() {
        let tree = Parser::new("program p : total := 7 end").unwrap().parse_program().unwrap();
        let assignment = tree.root().unwrap();
        let variable = assignment.child(Slot::Child0).unwrap();

        assert_eq!(assignment.position, Position::new(1, 19));
        assert_eq!(variable.position, Position::new(1, 13));
        assert_eq!(variable.child_tag(Slot::Child0), "total");
    }

    #[test]
    fn test_invalid_statement_start() {
        assert_eq!(
            parse_err("program p : 5 end"),
            "at 1:13, Expected {ID, if, while, print}, but found 'NUM'"
        );
    }

    #[test]
    fn test_trailing_semicolon_rejected() {
        assert_eq!(
            parse_err("program p : print 1 ; end"),
            "at 1:23, Expected {ID, if, while, print}, but found 'end'"
        );
    }

    #[test]
    fn test_missing_fi() {
        assert_eq!(
            parse_err("program p : if b then print 1 end"),
            "at 1:31, Expected { fi }, but found 'end'"
        );
    }

    #[test]
    fn test_missing_od() {
        assert_eq!(
            parse_err("program p : while b do print 1 fi end"),
            "at 1:32, Expected { od }, but found 'fi'"
        );
    }

    #[test]
    fn test_assignment_needs_colon_equals() {
        assert_eq!(
            parse_err("program p : x = 1 end"),
            "at 1:15, Expected { := }, but found '='"
        );
    }
}
