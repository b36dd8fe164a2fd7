//! Expression parsing implementation
//!
//! # Grammar
//!
//! ```text
//! Expression ::= SimpleExpr [ RelOp SimpleExpr ]     RelOp ::= < | =< | = | != | >= | >
//! SimpleExpr ::= Term { AddOp Term }                 AddOp ::= + | - | or
//! Term       ::= Factor { MulOp Factor }             MulOp ::= * | / | and
//! Factor     ::= [ UnaryOp ] ( Literal | ID | "(" Expression ")" )
//! UnaryOp    ::= - | not
//! Literal    ::= true | false | NUM
//! ```
//!
//! # Shapes
//!
//! Binary operators fold to the left: `1 - 2 - 3` is
//! `OP_MINUS { OP_MINUS { 1, 2 }, 3 }`. A relational operator appears at
//! most once per expression. Both unary operators produce `OP_NOT`; the
//! prefix `-` is logical negation in this language, not arithmetic negation.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{format_expected, ParseError, Parser};

/// Tokens accepted where a parenthesised expression closes. Only `)` is
/// consumed; an operator is left for the enclosing term or simple
/// expression loop.
const CLOSE_PAREN_FOLLOW: [TokenKind; 7] = [
    TokenKind::RParen,
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Or,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::And,
];

fn relational_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Lt => Some(BinOp::Lt),
        TokenKind::EqLt => Some(BinOp::EqLt),
        TokenKind::Eq => Some(BinOp::Eq),
        TokenKind::NotEq => Some(BinOp::NotEq),
        TokenKind::GtEq => Some(BinOp::GtEq),
        TokenKind::Gt => Some(BinOp::Gt),
        _ => None,
    }
}

fn additive_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Plus => Some(BinOp::Plus),
        TokenKind::Minus => Some(BinOp::Minus),
        TokenKind::Or => Some(BinOp::Or),
        _ => None,
    }
}

fn multiplicative_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Star => Some(BinOp::Mult),
        TokenKind::Slash => Some(BinOp::Div),
        TokenKind::And => Some(BinOp::And),
        _ => None,
    }
}

fn binary(op: BinOp, position: Position, left: AstNode, right: AstNode) -> AstNode {
    AstNode::new(NodeKind::Binary(op), position)
        .with_child0(left)
        .with_child1(right)
}

impl Parser {
    pub(crate) fn expression(&mut self) -> Result<AstNode, ParseError> {
        self.rule("Expression", |p| {
            let left = p.simple_expression()?;

            let Some(op) = relational_op(p.kind()) else {
                return Ok(left);
            };
            let op_token = p.advance()?;
            let right = p.simple_expression()?;

            Ok(binary(op, op_token.position, left, right))
        })
    }

    pub(crate) fn simple_expression(&mut self) -> Result<AstNode, ParseError> {
        self.rule("SimpleExpression", |p| {
            let mut tree = p.term()?;

            while let Some(op) = additive_op(p.kind()) {
                let op_token = p.advance()?;
                let right = p.term()?;
                tree = binary(op, op_token.position, tree, right);
            }

            Ok(tree)
        })
    }

    pub(crate) fn term(&mut self) -> Result<AstNode, ParseError> {
        self.rule("Term", |p| {
            let mut tree = p.factor()?;

            while let Some(op) = multiplicative_op(p.kind()) {
                let op_token = p.advance()?;
                let right = p.factor()?;
                tree = binary(op, op_token.position, tree, right);
            }

            Ok(tree)
        })
    }

    pub(crate) fn factor(&mut self) -> Result<AstNode, ParseError> {
        self.rule("Factor", |p| {
            let negation = if p.check(&[TokenKind::Minus, TokenKind::Not]) {
                Some(p.advance()?.position)
            } else {
                None
            };

            let operand = match p.kind() {
                TokenKind::True | TokenKind::False | TokenKind::Num => p.literal()?,
                TokenKind::Id => {
                    let id = p.advance()?;
                    AstNode::new(NodeKind::Variable, id.position).with_child0(AstNode::leaf(id.value, id.position))
                }
                TokenKind::LParen => {
                    p.advance()?;
                    let inner = p.expression()?;
                    p.close_paren()?;
                    inner
                }
                _ => return Err(p.error_expected("{ true, false, NUM, ID, ( , -, not }")),
            };

            Ok(match negation {
                Some(position) => AstNode::new(NodeKind::Not, position).with_child0(operand),
                None => operand,
            })
        })
    }

    /// `INT_LITERAL { digits }` or `BOOL_LITERAL { true | false }`
    pub(crate) fn literal(&mut self) -> Result<AstNode, ParseError> {
        self.rule("Literal", |p| {
            let token = p.expect(&[TokenKind::True, TokenKind::False, TokenKind::Num])?;

            let (kind, text) = match token.kind {
                TokenKind::Num => (NodeKind::IntLiteral, token.value),
                other => (NodeKind::BoolLiteral, other.as_str().to_string()),
            };

            Ok(AstNode::new(kind, token.position).with_child0(AstNode::leaf(text, token.position)))
        })
    }

    /// Close a parenthesized expression.
    ///
    /// The inner expression loops already consume every operator in the
    /// follow set, so in practice only `)` gets here. The operators are still
    /// accepted so the error lists the full follow set.
    fn close_paren(&mut self) -> Result<(), ParseError> {
        if self.check(&[TokenKind::RParen]) {
            self.advance()?;
            Ok(())
        } else if self.check(&CLOSE_PAREN_FOLLOW) {
            Ok(())
        } else {
            Err(self.error_expected(&format_expected(&CLOSE_PAREN_FOLLOW)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(source: &str) -> AstNode {
        Parser::new(source).unwrap().simple_expression().unwrap()
    }

    fn expr(source: &str) -> String {
        Parser::new(source).unwrap().expression().unwrap().to_string()
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let tree = simple("1 - 2 - 3");

        assert_eq!(
            tree.to_string(),
            "OP_MINUS(OP_MINUS(INT_LITERAL(1), INT_LITERAL(2)), INT_LITERAL(3))"
        );
        assert_eq!(tree.position, Position::new(1, 7));
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        assert_eq!(
            expr("a + b * c"),
            "OP_PLUS(VARIABLE(a), OP_MULT(VARIABLE(b), VARIABLE(c)))"
        );
        assert_eq!(
            expr("a / b and c"),
            "OP_AND(OP_DIV(VARIABLE(a), VARIABLE(b)), VARIABLE(c))"
        );
    }

    #[test]
    fn test_relational_operators() {
        for (source, tag) in [
            ("a < b", "OP_LT"),
            ("a =< b", "OP_EQLT"),
            ("a = b", "OP_EQ"),
            ("a != b", "OP_NOTEQ"),
            ("a >= b", "OP_GTEQ"),
            ("a > b", "OP_GT"),
        ] {
            assert_eq!(expr(source), format!("{}(VARIABLE(a), VARIABLE(b))", tag));
        }
    }

    #[test]
    fn test_relational_operator_is_not_chained() {
        let mut parser = Parser::new("a < b < c").unwrap();
        let tree = parser.expression().unwrap();

        assert_eq!(tree.to_string(), "OP_LT(VARIABLE(a), VARIABLE(b))");
        assert_eq!(parser.kind(), TokenKind::Lt);
    }

    #[test]
    fn test_relational_over_additive() {
        assert_eq!(
            expr("x + 1 >= y or z"),
            "OP_GTEQ(OP_PLUS(VARIABLE(x), INT_LITERAL(1)), OP_OR(VARIABLE(y), VARIABLE(z)))"
        );
    }

    #[test]
    fn test_prefix_minus_is_logical_negation() {
        // Prefix `-` yields OP_NOT, the same node as `not`
        assert_eq!(expr("-5"), "OP_NOT(INT_LITERAL(5))");
        assert_eq!(expr("not 5"), "OP_NOT(INT_LITERAL(5))");
    }

    #[test]
    fn test_unary_applies_to_one_factor() {
        assert_eq!(
            expr("not a and b"),
            "OP_AND(OP_NOT(VARIABLE(a)), VARIABLE(b))"
        );
        assert_eq!(expr("2 - -x"), "OP_MINUS(INT_LITERAL(2), OP_NOT(VARIABLE(x)))");
    }

    #[test]
    fn test_double_unary_rejected() {
        let err = Parser::new("not not a").unwrap().expression().unwrap_err();
        assert_eq!(
            err.to_string(),
            "at 1:5, Expected { true, false, NUM, ID, ( , -, not }, but found 'not'"
        );
    }

    #[test]
    fn test_parentheses_regroup() {
        assert_eq!(
            expr("(a + b) * c"),
            "OP_MULT(OP_PLUS(VARIABLE(a), VARIABLE(b)), VARIABLE(c))"
        );
        assert_eq!(
            expr("not (a or b)"),
            "OP_NOT(OP_OR(VARIABLE(a), VARIABLE(b)))"
        );
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let err = Parser::new("(a + b").unwrap().expression().unwrap_err();
        assert_eq!(
            err.to_string(),
            "at 1:7, Expected { ), +, -, or, *, /, and }, but found 'end-of-text'"
        );
    }

    #[test]
    fn test_operators_never_reach_close_paren() {
        // `*` and `and` are taken by the term loop before `)` is checked
        for source in ["(a * b", "(a and b"] {
            let err = Parser::new(source).unwrap().expression().unwrap_err();
            assert_eq!(err.position().column, source.len() + 1);
        }

        let err = Parser::new("(a * b c").unwrap().expression().unwrap_err();
        assert_eq!(
            err.to_string(),
            "at 1:8, Expected { ), +, -, or, *, /, and }, but found 'ID'"
        );
    }

    #[test]
    fn test_literals() {
        let tree = Parser::new("true").unwrap().literal().unwrap();
        assert_eq!(tree.kind, NodeKind::BoolLiteral);
        assert_eq!(tree.child_tag(Slot::Child0), "true");

        assert_eq!(expr("false"), "BOOL_LITERAL(false)");
        assert_eq!(expr("042"), "INT_LITERAL(042)");
    }

    #[test]
    fn test_operator_positions() {
        let tree = Parser::new("a  *  b").unwrap().expression().unwrap();
        assert_eq!(tree.position, Position::new(1, 4));
        assert_eq!(tree.child(Slot::Child1).unwrap().position, Position::new(1, 7));
    }

    #[test]
    fn test_missing_operand() {
        let err = Parser::new("a + ;").unwrap().expression().unwrap_err();
        assert_eq!(err.position(), Position::new(1, 5));
    }
}
