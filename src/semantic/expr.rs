//! Expression model shared by the statement summaries.
//!
//! Precedence is encoded in tree shape: a [`Predicate`] never needs parentheses
//! to be read correctly. Identifiers are stored de-quoted.

use std::fmt;

use crate::sql::{LiteralKind, ObjectName};

/// A literal scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    /// Raw text between the outer quotes.
    String(String),
    Boolean(bool),
    Null,
}

impl Value {
    /// Converts a parsed literal. Placeholders have no value and yield `None`.
    pub fn from_literal(kind: &LiteralKind) -> Option<Self> {
        match kind {
            LiteralKind::Integer(n) => Some(Value::Integer(*n)),
            LiteralKind::Float(n) => Some(Value::Float(*n)),
            LiteralKind::String(s) => Some(Value::String(s.clone())),
            LiteralKind::Boolean(b) => Some(Value::Boolean(*b)),
            LiteralKind::Null => Some(Value::Null),
            LiteralKind::Placeholder => None,
        }
    }

    /// Name of the value's type, as used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
        }
    }
}

/// Renders the value as SQL text for placeholder substitution.
///
/// Strings are written as-is, without quotes. Floats always carry a fraction
/// or exponent so they read back as floats.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::String(s) => f.write_str(s),
            Value::Boolean(true) => f.write_str("TRUE"),
            Value::Boolean(false) => f.write_str("FALSE"),
            Value::Null => f.write_str("NULL"),
        }
    }
}

/// Operators of [`Predicate`] and [`Assignment`] nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
    Ne,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Like,
    NotLike,
    In,
    NotIn,
    Is,
    IsNot,
    And,
    Or,
    /// Unary NOT; the predicate's left side is an empty [`RawExpr`].
    Not,
}

impl Operator {
    /// SQL spelling of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Ne => "<>",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Is => "IS",
            Operator::IsNot => "IS NOT",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
        }
    }

    /// Human-readable operator name.
    pub fn display_text(&self) -> &'static str {
        match self {
            Operator::Eq => "equal",
            Operator::Gt => "greater than",
            Operator::Ge => "greater than or equal",
            Operator::Lt => "less than",
            Operator::Le => "less than or equal",
            Operator::Ne => "not equal",
            Operator::Add => "plus",
            Operator::Sub => "minus",
            Operator::Mul => "multiply",
            Operator::Div => "divide",
            Operator::Mod => "modulo",
            Operator::Like => "like",
            Operator::NotLike => "not like",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Is => "is",
            Operator::IsNot => "is not",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Operator::And | Operator::Or | Operator::Not)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A de-quoted column reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    /// Terminal identifier; `*` for wildcards.
    pub name: String,
    /// Table (and database) prefix, if written.
    pub qualifier: Option<String>,
    pub alias: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualifier: None,
            alias: None,
        }
    }

    pub fn from_name(name: &ObjectName) -> Self {
        Self {
            name: name.name().value.clone(),
            qualifier: name.qualifier(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: Option<String>) -> Self {
        self.alias = alias;
        self
    }
}

/// A de-quoted table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName {
    pub database: Option<String>,
    pub name: String,
}

impl TableName {
    pub fn from_name(name: &ObjectName) -> Self {
        Self {
            database: name.qualifier(),
            name: name.name().value.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Avg,
    Sum,
    Count,
    Min,
    Max,
}

impl AggregateFunction {
    /// Recognizes an aggregate function name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "AVG" => Some(AggregateFunction::Avg),
            "SUM" => Some(AggregateFunction::Sum),
            "COUNT" => Some(AggregateFunction::Count),
            "MIN" => Some(AggregateFunction::Min),
            "MAX" => Some(AggregateFunction::Max),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AggregateArg {
    Column(String),
    Star,
    Value(Value),
}

/// An aggregate function applied to a column, `*`, or a literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub function: AggregateFunction,
    pub arg: AggregateArg,
    pub alias: Option<String>,
    pub distinct: bool,
}

/// An opaque pass-through fragment.
///
/// Used for the empty left operand of unary NOT and minus, for `?`
/// placeholders, and for non-aggregate function calls (`text` holds the
/// function name).
#[derive(Debug, Clone, PartialEq)]
pub struct RawExpr {
    pub text: String,
    pub args: Vec<Expr>,
}

impl RawExpr {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            args: vec![],
        }
    }
}

/// A binary node used in WHERE, HAVING and logical composition.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub left: Expr,
    pub op: Operator,
    pub right: Expr,
}

impl Predicate {
    /// Returns true for the unary form produced by NOT and minus.
    pub fn is_unary(&self) -> bool {
        matches!(&self.left, Expr::Raw(raw) if raw.text.is_empty() && raw.args.is_empty())
    }
}

/// A SET-clause element. The operator is always [`Operator::Eq`].
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub left: Column,
    pub op: Operator,
    pub right: Expr,
}

impl Assignment {
    pub fn new(left: Column, right: Expr) -> Self {
        Self {
            left,
            op: Operator::Eq,
            right,
        }
    }
}

/// A resolved expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column(Column),
    Value(Value),
    /// Literal list, used by IN and NOT IN.
    Values(Vec<Value>),
    Aggregate(Aggregate),
    Raw(RawExpr),
    Predicate(Box<Predicate>),
}

impl Expr {
    pub fn predicate(left: Expr, op: Operator, right: Expr) -> Self {
        Expr::Predicate(Box::new(Predicate { left, op, right }))
    }

    /// Builds the unary form `Predicate { Raw(""), op, operand }`.
    pub fn unary(op: Operator, operand: Expr) -> Self {
        Self::predicate(Expr::Raw(RawExpr::new("")), op, operand)
    }

    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column(Column::new(name))
    }

    pub fn as_predicate(&self) -> Option<&Predicate> {
        match self {
            Expr::Predicate(p) => Some(p),
            _ => None,
        }
    }
}

/// Renders the expression with every predicate parenthesized, so tree shape
/// is visible in the output.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column(col) => match &col.qualifier {
                Some(q) => write!(f, "{q}.{}", col.name),
                None => f.write_str(&col.name),
            },
            Expr::Value(Value::String(s)) => write!(f, "'{s}'"),
            Expr::Value(v) => write!(f, "{v}"),
            Expr::Values(values) => {
                f.write_str("(")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match v {
                        Value::String(s) => write!(f, "'{s}'")?,
                        other => write!(f, "{other}")?,
                    }
                }
                f.write_str(")")
            }
            Expr::Aggregate(agg) => {
                write!(f, "{}(", agg.function.as_str())?;
                if agg.distinct {
                    f.write_str("DISTINCT ")?;
                }
                match &agg.arg {
                    AggregateArg::Column(c) => f.write_str(c)?,
                    AggregateArg::Star => f.write_str("*")?,
                    AggregateArg::Value(v) => write!(f, "{v}")?,
                }
                f.write_str(")")
            }
            Expr::Raw(raw) if raw.args.is_empty() => f.write_str(&raw.text),
            Expr::Raw(raw) => {
                write!(f, "{}(", raw.text)?;
                for (i, arg) in raw.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Expr::Predicate(p) if p.is_unary() => write!(f, "({} {})", p.op, p.right),
            Expr::Predicate(p) => write!(f, "({} {} {})", p.left, p.op, p.right),
        }
    }
}
