//! Conversion of parsed expressions into the [`Expr`] model.

use crate::sql::{self, BinaryOperator, FunctionArgs, FunctionCall, LiteralKind, SqlTree, UnaryOperator};

use super::error::SemanticError;
use super::expr::{Aggregate, AggregateArg, AggregateFunction, Column, Expr, Operator, RawExpr, Value};

type Result<T> = std::result::Result<T, SemanticError>;

/// Builds [`Expr`] values from AST expressions.
///
/// The builder borrows the statement source so unsupported fragments can be
/// quoted verbatim in errors.
#[derive(Debug, Clone, Copy)]
pub struct ExprBuilder<'a> {
    source: &'a str,
}

impl<'a> ExprBuilder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    pub fn for_tree(tree: &'a SqlTree) -> Self {
        Self::new(tree.source())
    }

    /// Returns the source text of `expr`.
    pub fn fragment(&self, expr: &sql::Expr) -> String {
        expr.span().text(self.source).to_string()
    }

    pub fn build(&self, expr: &sql::Expr) -> Result<Expr> {
        match expr {
            sql::Expr::Literal(lit) => Ok(literal_expr(&lit.kind)),
            sql::Expr::Column(col) => Ok(Expr::Column(Column::from_name(&col.name))),
            sql::Expr::Function(call) => self.build_function(call),
            sql::Expr::Nested { expr, .. } => self.build(expr),
            sql::Expr::UnaryOp { op, operand, .. } => self.build_unary(*op, operand),
            sql::Expr::BinaryOp {
                left, op, right, ..
            } => Ok(Expr::predicate(
                self.build(left)?,
                binary_operator(*op),
                self.build(right)?,
            )),
            sql::Expr::InList {
                expr,
                list,
                negated,
                ..
            } => {
                let left = self.build(expr)?;
                let mut values = Vec::with_capacity(list.len());
                for item in list {
                    match literal_value(item) {
                        Some(value) => values.push(value),
                        None => return Err(SemanticError::clause("IN list", self.fragment(item))),
                    }
                }
                let op = if *negated { Operator::NotIn } else { Operator::In };
                Ok(Expr::predicate(left, op, Expr::Values(values)))
            }
            sql::Expr::Like {
                expr: operand,
                pattern,
                escape,
                negated,
                ..
            } => {
                if escape.is_some() {
                    return Err(SemanticError::UnsupportedExpression {
                        fragment: self.fragment(expr),
                    });
                }
                let op = if *negated {
                    Operator::NotLike
                } else {
                    Operator::Like
                };
                Ok(Expr::predicate(self.build(operand)?, op, self.build(pattern)?))
            }
            sql::Expr::Between {
                expr,
                low,
                high,
                negated,
                ..
            } => {
                let operand = self.build(expr)?;
                let range = Expr::predicate(
                    Expr::predicate(operand.clone(), Operator::Ge, self.build(low)?),
                    Operator::And,
                    Expr::predicate(operand, Operator::Le, self.build(high)?),
                );
                if *negated {
                    Ok(Expr::unary(Operator::Not, range))
                } else {
                    Ok(range)
                }
            }
            sql::Expr::IsNull { expr, negated, .. } => {
                let op = if *negated { Operator::IsNot } else { Operator::Is };
                Ok(Expr::predicate(self.build(expr)?, op, Expr::Value(Value::Null)))
            }
        }
    }

    fn build_unary(&self, op: UnaryOperator, operand: &sql::Expr) -> Result<Expr> {
        match op {
            UnaryOperator::Not => Ok(Expr::unary(Operator::Not, self.build(operand)?)),
            UnaryOperator::Plus => self.build(operand),
            UnaryOperator::Minus => match self.build(operand)? {
                Expr::Value(Value::Integer(n)) if n != i64::MIN => {
                    Ok(Expr::Value(Value::Integer(-n)))
                }
                Expr::Value(Value::Float(n)) => Ok(Expr::Value(Value::Float(-n))),
                other => Ok(Expr::unary(Operator::Sub, other)),
            },
        }
    }

    fn build_function(&self, call: &FunctionCall) -> Result<Expr> {
        if AggregateFunction::parse(&call.name.value).is_some() {
            return self.build_aggregate(call, None).map(Expr::Aggregate);
        }
        let args = match &call.args {
            FunctionArgs::Star { .. } => vec![Expr::Raw(RawExpr::new("*"))],
            FunctionArgs::List(args) => args
                .iter()
                .map(|arg| self.build(arg))
                .collect::<Result<Vec<_>>>()?,
        };
        Ok(Expr::Raw(RawExpr {
            text: call.name.value.clone(),
            args,
        }))
    }

    /// Builds an aggregate call. The argument must be `*`, a single column or a
    /// single literal.
    pub fn build_aggregate(&self, call: &FunctionCall, alias: Option<String>) -> Result<Aggregate> {
        let unsupported = || SemanticError::UnsupportedExpression {
            fragment: call.span.text(self.source).to_string(),
        };
        let function = AggregateFunction::parse(&call.name.value).ok_or_else(unsupported)?;
        let arg = match &call.args {
            FunctionArgs::Star { .. } => AggregateArg::Star,
            FunctionArgs::List(args) => match args.as_slice() {
                [sql::Expr::Column(col)] => AggregateArg::Column(qualified_name(&col.name)),
                [arg] => literal_value(arg)
                    .map(AggregateArg::Value)
                    .ok_or_else(unsupported)?,
                _ => return Err(unsupported()),
            },
        };
        Ok(Aggregate {
            function,
            arg,
            alias,
            distinct: call.distinct,
        })
    }
}

/// Joins every part of a name with `.`, de-quoted.
pub(crate) fn qualified_name(name: &sql::ObjectName) -> String {
    let parts: Vec<&str> = name.parts.iter().map(|p| p.value.as_str()).collect();
    parts.join(".")
}

/// Returns the value of a literal expression, looking through parentheses.
/// Placeholders have no value.
pub(crate) fn literal_value(expr: &sql::Expr) -> Option<Value> {
    match expr {
        sql::Expr::Literal(lit) => Value::from_literal(&lit.kind),
        sql::Expr::Nested { expr, .. } => literal_value(expr),
        _ => None,
    }
}

fn literal_expr(kind: &LiteralKind) -> Expr {
    match Value::from_literal(kind) {
        Some(value) => Expr::Value(value),
        None => Expr::Raw(RawExpr::new("?")),
    }
}

fn binary_operator(op: BinaryOperator) -> Operator {
    match op {
        BinaryOperator::Add => Operator::Add,
        BinaryOperator::Sub => Operator::Sub,
        BinaryOperator::Mul => Operator::Mul,
        BinaryOperator::Div => Operator::Div,
        BinaryOperator::Mod => Operator::Mod,
        BinaryOperator::Eq => Operator::Eq,
        BinaryOperator::Neq => Operator::Ne,
        BinaryOperator::Lt => Operator::Lt,
        BinaryOperator::LtEq => Operator::Le,
        BinaryOperator::Gt => Operator::Gt,
        BinaryOperator::GtEq => Operator::Ge,
        BinaryOperator::And => Operator::And,
        BinaryOperator::Or => Operator::Or,
    }
}
