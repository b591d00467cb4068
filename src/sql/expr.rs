//! Expression parsing with precedence climbing.
//!
//! This module implements expression parsing using the precedence climbing algorithm,
//! following MySQL's operator precedence and left associativity.

use super::ast::{
    BinaryOperator, ColumnRef, Expr, FunctionArgs, FunctionCall, Ident, Literal, LiteralKind,
    UnaryOperator,
};
use super::error::{Span, SyntaxError};
use super::parser::{Parser, is_ident_kind};
use super::token::{Keyword, TokenKind};

/// Operator precedence levels (higher = binds tighter).
///
/// Precedence (low to high):
/// 1. OR, ||
/// 2. AND, &&
/// 3. NOT (unary)
/// 4. =, <>, !=, <, <=, >, >=, IS, LIKE, IN, BETWEEN
/// 5. +, -
/// 6. *, /, %
/// 7. Unary -, +
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest = 0,
    Or = 1,
    And = 2,
    Not = 3,
    Comparison = 4,
    AddSub = 5,
    MulDiv = 6,
    Unary = 7,
}

impl Precedence {
    /// Returns the next higher precedence level.
    pub fn next(self) -> Self {
        match self {
            Precedence::Lowest => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Not,
            Precedence::Not => Precedence::Comparison,
            Precedence::Comparison => Precedence::AddSub,
            Precedence::AddSub => Precedence::MulDiv,
            Precedence::MulDiv => Precedence::Unary,
            Precedence::Unary => Precedence::Unary,
        }
    }
}

impl Parser<'_> {
    /// Parses an expression.
    pub fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_expr_with_precedence(Precedence::Lowest)
    }

    /// Parses an expression with minimum precedence.
    ///
    /// Every binary level is left-associative: the right operand is parsed one
    /// level tighter than the operator itself.
    pub fn parse_expr_with_precedence(
        &mut self,
        min_prec: Precedence,
    ) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_unary_expr()?;

        loop {
            if min_prec <= Precedence::Comparison && self.at_predicate_suffix() {
                left = self.parse_predicate_suffix(left)?;
                continue;
            }

            let Some((op, prec)) = self.peek_binary_op() else {
                break;
            };

            if prec < min_prec {
                break;
            }

            self.advance();

            let right = self.parse_expr_with_precedence(prec.next())?;
            let span = left.span().extend(right.span());
            left = Expr::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    /// Parses a unary expression (NOT, -, +) or primary expression.
    fn parse_unary_expr(&mut self) -> Result<Expr, SyntaxError> {
        let start = self.current_span();

        if self.consume_keyword(Keyword::Not) {
            let operand = self.parse_expr_with_precedence(Precedence::Not)?;
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Not,
                span: start.extend(operand.span()),
                operand: Box::new(operand),
            });
        }

        if self.consume_token(TokenKind::Minus) {
            // A minus directly in front of a number is a signed constant.
            if let Some(literal) = self.parse_negative_number(start)? {
                return Ok(Expr::Literal(literal));
            }
            let operand = self.parse_expr_with_precedence(Precedence::Unary)?;
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Minus,
                span: start.extend(operand.span()),
                operand: Box::new(operand),
            });
        }

        if self.consume_token(TokenKind::Plus) {
            let operand = self.parse_expr_with_precedence(Precedence::Unary)?;
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Plus,
                span: start.extend(operand.span()),
                operand: Box::new(operand),
            });
        }

        self.parse_primary_expr()
    }

    fn parse_negative_number(&mut self, minus: Span) -> Result<Option<Literal>, SyntaxError> {
        let span = self.current_span();
        let kind = match self.peek_kind() {
            Some(TokenKind::Integer(n)) => LiteralKind::Integer(-*n),
            Some(TokenKind::Float(n)) => LiteralKind::Float(-*n),
            Some(TokenKind::MinIntegerMagnitude) => LiteralKind::Integer(i64::MIN),
            _ => return Ok(None),
        };
        self.advance();
        Ok(Some(Literal {
            kind,
            span: minus.extend(span),
        }))
    }

    /// Returns true if the next tokens start IS, IN, LIKE or BETWEEN.
    fn at_predicate_suffix(&self) -> bool {
        let predicate_keyword = |kind: Option<&TokenKind>| {
            matches!(
                kind,
                Some(TokenKind::Keyword(
                    Keyword::In | Keyword::Like | Keyword::Between
                ))
            )
        };

        match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::Is)) => true,
            Some(TokenKind::Keyword(Keyword::Not)) => predicate_keyword(self.peek_nth_kind(1)),
            kind => predicate_keyword(kind),
        }
    }

    /// Parses the comparison-level predicates that follow an operand:
    /// IS [NOT] NULL, [NOT] IN (...), [NOT] LIKE and [NOT] BETWEEN.
    fn parse_predicate_suffix(&mut self, expr: Expr) -> Result<Expr, SyntaxError> {
        let start = expr.span();

        if self.consume_keyword(Keyword::Is) {
            let negated = self.consume_keyword(Keyword::Not);
            self.expect_keyword(Keyword::Null)?;
            return Ok(Expr::IsNull {
                expr: Box::new(expr),
                negated,
                span: Span::new(start.start, self.prev_end()),
            });
        }

        let negated = self.consume_keyword(Keyword::Not);

        if self.consume_keyword(Keyword::In) {
            self.expect_token(TokenKind::LParen)?;
            if self.check_keyword(Keyword::Select) {
                return Err(SyntaxError::new(
                    "subqueries are not supported",
                    self.current_span(),
                ));
            }
            let list = self.parse_expr_list()?;
            self.expect_token(TokenKind::RParen)?;
            return Ok(Expr::InList {
                expr: Box::new(expr),
                list,
                negated,
                span: Span::new(start.start, self.prev_end()),
            });
        }

        if self.consume_keyword(Keyword::Between) {
            let low = self.parse_expr_with_precedence(Precedence::AddSub)?;
            self.expect_keyword(Keyword::And)?;
            let high = self.parse_expr_with_precedence(Precedence::AddSub)?;
            return Ok(Expr::Between {
                span: start.extend(high.span()),
                expr: Box::new(expr),
                low: Box::new(low),
                high: Box::new(high),
                negated,
            });
        }

        self.expect_keyword(Keyword::Like)?;
        let pattern = self.parse_expr_with_precedence(Precedence::AddSub)?;
        let escape = if self.consume_keyword(Keyword::Escape) {
            Some(Box::new(self.parse_expr_with_precedence(Precedence::AddSub)?))
        } else {
            None
        };
        Ok(Expr::Like {
            expr: Box::new(expr),
            pattern: Box::new(pattern),
            escape,
            negated,
            span: Span::new(start.start, self.prev_end()),
        })
    }

    /// Parses a primary expression (literals, identifiers, function calls, etc.).
    fn parse_primary_expr(&mut self) -> Result<Expr, SyntaxError> {
        let span = self.current_span();

        let literal = match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::Null)) => Some(LiteralKind::Null),
            Some(TokenKind::Keyword(Keyword::True)) => Some(LiteralKind::Boolean(true)),
            Some(TokenKind::Keyword(Keyword::False)) => Some(LiteralKind::Boolean(false)),
            Some(TokenKind::Integer(n)) => Some(LiteralKind::Integer(*n)),
            Some(TokenKind::Float(n)) => Some(LiteralKind::Float(*n)),
            Some(TokenKind::String(s)) => Some(LiteralKind::String(s.clone())),
            Some(TokenKind::Placeholder) => Some(LiteralKind::Placeholder),
            _ => None,
        };
        if let Some(kind) = literal {
            self.advance();
            return Ok(Expr::Literal(Literal { kind, span }));
        }
        if self.check_token(TokenKind::MinIntegerMagnitude) {
            return Err(SyntaxError::new("integer literal out of range", span));
        }

        // Parenthesized expression
        if self.consume_token(TokenKind::LParen) {
            if self.check_keyword(Keyword::Select) {
                return Err(SyntaxError::new(
                    "subqueries are not supported",
                    self.current_span(),
                ));
            }
            let expr = self.parse_expr()?;
            self.expect_token(TokenKind::RParen)?;
            return Ok(Expr::Nested {
                expr: Box::new(expr),
                span: Span::new(span.start, self.prev_end()),
            });
        }

        // VALUES(col) inside ON DUPLICATE KEY UPDATE
        if self.check_keyword(Keyword::Values)
            && self.peek_nth_kind(1) == Some(&TokenKind::LParen)
        {
            self.advance();
            let name = Ident {
                value: Keyword::Values.as_str().to_string(),
                quoted: false,
                span,
            };
            return self.parse_function_call(name);
        }

        // Identifier (column reference or function call)
        if self.peek_kind().is_some_and(is_ident_kind) {
            if self.peek_nth_kind(1) == Some(&TokenKind::LParen) {
                let name = self.expect_ident()?;
                return self.parse_function_call(name);
            }
            let name = self.parse_object_name()?;
            return Ok(Expr::Column(ColumnRef { name }));
        }

        Err(SyntaxError::unexpected_token(
            "expression",
            &self.current_token_name(),
            span,
        ))
    }

    /// Parses a function call's parenthesized arguments.
    fn parse_function_call(&mut self, name: Ident) -> Result<Expr, SyntaxError> {
        let start = name.span;
        self.expect_token(TokenKind::LParen)?;

        let distinct = self.consume_keyword(Keyword::Distinct);

        let args = if self.check_token(TokenKind::Asterisk) {
            let span = self.current_span();
            self.advance();
            FunctionArgs::Star { span }
        } else if self.check_token(TokenKind::RParen) {
            FunctionArgs::List(vec![])
        } else {
            FunctionArgs::List(self.parse_expr_list()?)
        };

        self.expect_token(TokenKind::RParen)?;

        Ok(Expr::Function(FunctionCall {
            name,
            distinct,
            args,
            span: Span::new(start.start, self.prev_end()),
        }))
    }

    /// Peeks at the next token and returns the binary operator and its precedence.
    fn peek_binary_op(&self) -> Option<(BinaryOperator, Precedence)> {
        match self.peek_kind()? {
            TokenKind::Keyword(Keyword::Or) | TokenKind::DoublePipe => {
                Some((BinaryOperator::Or, Precedence::Or))
            }
            TokenKind::Keyword(Keyword::And) | TokenKind::DoubleAmpersand => {
                Some((BinaryOperator::And, Precedence::And))
            }
            TokenKind::Eq => Some((BinaryOperator::Eq, Precedence::Comparison)),
            TokenKind::Neq => Some((BinaryOperator::Neq, Precedence::Comparison)),
            TokenKind::Lt => Some((BinaryOperator::Lt, Precedence::Comparison)),
            TokenKind::LtEq => Some((BinaryOperator::LtEq, Precedence::Comparison)),
            TokenKind::Gt => Some((BinaryOperator::Gt, Precedence::Comparison)),
            TokenKind::GtEq => Some((BinaryOperator::GtEq, Precedence::Comparison)),
            TokenKind::Plus => Some((BinaryOperator::Add, Precedence::AddSub)),
            TokenKind::Minus => Some((BinaryOperator::Sub, Precedence::AddSub)),
            TokenKind::Asterisk => Some((BinaryOperator::Mul, Precedence::MulDiv)),
            TokenKind::Slash => Some((BinaryOperator::Div, Precedence::MulDiv)),
            TokenKind::Percent => Some((BinaryOperator::Mod, Precedence::MulDiv)),
            _ => None,
        }
    }
}
