//! Abstract Syntax Tree (AST) for SQL statements.
//!
//! This module defines the data structures that represent a parsed MySQL
//! statement. Every node that can be rewritten, quoted in an error, or compared
//! during placeholder binding carries the [`Span`] it was parsed from.

use super::error::Span;

/// A comment found between tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Full comment text including its delimiters.
    pub text: String,
    pub style: CommentStyle,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `-- ...` or `# ...`
    Line,
    /// `/* ... */`
    Block,
}

/// An identifier, de-quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub value: String,
    /// Whether the identifier was written in backticks.
    pub quoted: bool,
    pub span: Span,
}

/// A possibly qualified object name such as `t`, `db.t` or `` `db`.`t` ``.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName {
    /// Name parts in source order; never empty.
    pub parts: Vec<Ident>,
    pub span: Span,
}

impl ObjectName {
    /// Returns the terminal part of the name.
    pub fn name(&self) -> &Ident {
        // parts is never empty by construction
        &self.parts[self.parts.len() - 1]
    }

    /// Returns the leading parts joined with `.`, if any.
    pub fn qualifier(&self) -> Option<String> {
        let (_, prefix) = self.parts.split_last()?;
        if prefix.is_empty() {
            return None;
        }
        let parts: Vec<&str> = prefix.iter().map(|p| p.value.as_str()).collect();
        Some(parts.join("."))
    }
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement.
    Select(Box<SelectStmt>),
    /// INSERT statement.
    Insert(Box<InsertStmt>),
    /// UPDATE statement.
    Update(Box<UpdateStmt>),
    /// DELETE statement.
    Delete(Box<DeleteStmt>),
    /// BEGIN [WORK] or START TRANSACTION.
    Begin(TransactionStmt),
    /// COMMIT [WORK].
    Commit(TransactionStmt),
    /// ROLLBACK [WORK].
    Rollback(TransactionStmt),
    /// Any statement outside the modeled surface. Its tokens are kept opaque.
    Other(OtherStmt),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Select(s) => s.span,
            Statement::Insert(s) => s.span,
            Statement::Update(s) => s.span,
            Statement::Delete(s) => s.span,
            Statement::Begin(s) | Statement::Commit(s) | Statement::Rollback(s) => s.span,
            Statement::Other(s) => s.span,
        }
    }
}

/// BEGIN, COMMIT or ROLLBACK.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionStmt {
    pub hint: Option<Comment>,
    pub span: Span,
}

/// A statement the parser does not model.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherStmt {
    /// Leading keyword or identifier as written.
    pub keyword: String,
    /// Placeholders found among the statement's tokens.
    pub placeholders: Vec<Literal>,
    pub span: Span,
}

/// SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    /// Proxy hint comment placed right after `SELECT`.
    pub hint: Option<Comment>,
    pub distinct: bool,
    pub columns: Vec<SelectItem>,
    /// FROM clause table references; empty without FROM.
    pub from: Vec<TableRef>,
    pub where_clause: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    pub order_by: Vec<OrderByItem>,
    pub limit: Option<LimitClause>,
    pub span: Span,
}

impl SelectStmt {
    /// Returns the table name when the statement reads from exactly one plain table.
    pub fn single_table(&self) -> Option<&ObjectName> {
        sole_table(&self.from)
    }
}

/// An item in the SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// SELECT *
    Wildcard { span: Span },
    /// SELECT t.*
    QualifiedWildcard { qualifier: ObjectName, span: Span },
    /// An expression with optional alias. The span covers the alias too.
    Expr {
        expr: Expr,
        alias: Option<Ident>,
        span: Span,
    },
}

impl SelectItem {
    pub fn span(&self) -> Span {
        match self {
            SelectItem::Wildcard { span }
            | SelectItem::QualifiedWildcard { span, .. }
            | SelectItem::Expr { span, .. } => *span,
        }
    }
}

/// A table reference in a FROM, UPDATE or DELETE table list.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    /// Simple table reference.
    Table {
        name: ObjectName,
        alias: Option<Ident>,
        span: Span,
    },
    /// Join between tables.
    Join {
        left: Box<TableRef>,
        join_type: JoinType,
        right: Box<TableRef>,
        condition: Option<JoinCondition>,
        span: Span,
    },
}

impl TableRef {
    pub fn span(&self) -> Span {
        match self {
            TableRef::Table { span, .. } | TableRef::Join { span, .. } => *span,
        }
    }

    /// Returns the table name if this is a plain table reference.
    pub fn as_table(&self) -> Option<&ObjectName> {
        match self {
            TableRef::Table { name, .. } => Some(name),
            TableRef::Join { .. } => None,
        }
    }
}

/// Returns the table name of a list holding exactly one plain table.
fn sole_table(tables: &[TableRef]) -> Option<&ObjectName> {
    match tables {
        [table] => table.as_table(),
        _ => None,
    }
}

/// Type of JOIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Cross,
}

/// JOIN condition.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
    On(Expr),
    Using(Vec<Ident>),
}

/// ORDER BY item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByItem {
    pub expr: Expr,
    pub direction: SortDirection,
    pub span: Span,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// LIMIT clause in any of its MySQL spellings: `LIMIT n`, `LIMIT n OFFSET m`
/// and `LIMIT m, n`.
///
/// Both operands are integer literals or placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitClause {
    pub limit: Literal,
    pub offset: Option<Literal>,
    /// Covers the `LIMIT` keyword through the last operand.
    pub span: Span,
}

/// INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStmt {
    /// Proxy hint comment placed right after `INSERT`.
    pub hint: Option<Comment>,
    pub ignore: bool,
    pub table: ObjectName,
    /// Declared columns; empty when the column list is omitted.
    pub columns: Vec<Ident>,
    pub source: InsertSource,
    /// ON DUPLICATE KEY UPDATE assignments.
    pub on_duplicate: Vec<Assignment>,
    pub span: Span,
}

/// Where an INSERT takes its rows from.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// VALUES (...), (...) or VALUE (...).
    Values(Vec<ValueRow>),
    /// INSERT ... SET a = 1, b = 2
    Set(Vec<Assignment>),
    /// INSERT ... SELECT
    Select(Box<SelectStmt>),
}

/// One parenthesized tuple of a VALUES list.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRow {
    pub values: Vec<Expr>,
    /// Covers the tuple including its parentheses.
    pub span: Span,
    /// Covers the text between the parentheses.
    pub inner: Span,
}

/// UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStmt {
    /// Proxy hint comment placed right after `UPDATE`.
    pub hint: Option<Comment>,
    pub tables: Vec<TableRef>,
    pub assignments: Vec<Assignment>,
    pub where_clause: Option<Expr>,
    pub order_by: Vec<OrderByItem>,
    pub limit: Option<LimitClause>,
    pub span: Span,
}

impl UpdateStmt {
    /// Returns the table name when the statement updates exactly one plain table.
    pub fn single_table(&self) -> Option<&ObjectName> {
        sole_table(&self.tables)
    }
}

/// SET assignment (`column = expr`).
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: ObjectName,
    pub value: Expr,
    pub span: Span,
}

/// DELETE statement.
///
/// The single-table form `DELETE FROM t ...` leaves `targets` empty. The
/// multi-table forms `DELETE t1 FROM ...` and `DELETE FROM t1 USING ...` list
/// the tables rows are deleted from in `targets` and the joined sources in `from`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStmt {
    /// Proxy hint comment placed right after `DELETE`.
    pub hint: Option<Comment>,
    pub targets: Vec<ObjectName>,
    pub from: Vec<TableRef>,
    pub where_clause: Option<Expr>,
    pub order_by: Vec<OrderByItem>,
    pub limit: Option<LimitClause>,
    pub span: Span,
}

impl DeleteStmt {
    /// Returns the table name for the single-table form.
    pub fn single_table(&self) -> Option<&ObjectName> {
        if !self.targets.is_empty() {
            return None;
        }
        sole_table(&self.from)
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralKind {
    Integer(i64),
    Float(f64),
    /// Raw text between the outer quotes.
    String(String),
    Boolean(bool),
    Null,
    /// The `?` placeholder.
    Placeholder,
}

impl Literal {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, LiteralKind::Placeholder)
    }
}

/// A column reference such as `c`, `t.c` or `` `db`.`t`.`c` ``.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub name: ObjectName,
}

/// Function call arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArgs {
    /// `f(*)`
    Star { span: Span },
    /// `f(a, b)`, possibly empty.
    List(Vec<Expr>),
}

/// Function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: Ident,
    pub distinct: bool,
    pub args: FunctionArgs,
    pub span: Span,
}

impl FunctionCall {
    /// Returns the span of the argument text, after any DISTINCT keyword.
    pub fn args_span(&self) -> Option<Span> {
        match &self.args {
            FunctionArgs::Star { span } => Some(*span),
            FunctionArgs::List(args) => {
                let first = args.first()?.span();
                let last = args.last()?.span();
                Some(first.extend(last))
            }
        }
    }
}

/// SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Column(ColumnRef),
    Function(FunctionCall),
    /// Parenthesized expression.
    Nested { expr: Box<Expr>, span: Span },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
        span: Span,
    },
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
        span: Span,
    },
    /// expr [NOT] IN (list)
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
        span: Span,
    },
    /// expr [NOT] LIKE pattern [ESCAPE escape]
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape: Option<Box<Expr>>,
        negated: bool,
        span: Span,
    },
    /// expr [NOT] BETWEEN low AND high
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
        span: Span,
    },
    /// expr IS [NOT] NULL
    IsNull {
        expr: Box<Expr>,
        negated: bool,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(lit) => lit.span,
            Expr::Column(col) => col.name.span,
            Expr::Function(call) => call.span,
            Expr::Nested { span, .. }
            | Expr::UnaryOp { span, .. }
            | Expr::BinaryOp { span, .. }
            | Expr::InList { span, .. }
            | Expr::Like { span, .. }
            | Expr::Between { span, .. }
            | Expr::IsNull { span, .. } => *span,
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    // Logical
    And,
    Or,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Minus,
    Plus,
}
