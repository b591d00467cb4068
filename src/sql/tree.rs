//! Parsed statement ownership and a uniform node view.
//!
//! [`SqlTree`] owns the statement source and its AST. [`Node`] exposes every AST
//! node through the same `kind()`/`children()` interface so structural walks
//! (placeholder binding, placeholder counting) do not have to match on each
//! node type.

use std::fmt;
use std::str::FromStr;

use super::ast::*;
use super::error::{Span, SyntaxError};
use super::parser::Parser;

/// One parsed SQL statement together with its source text.
///
/// The tree is immutable once parsed. Rewriting produces new text from edits
/// and never touches the tree, so one tree can serve any number of semantic
/// passes and rewrites.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlTree {
    source: String,
    statement: Statement,
    comments: Vec<Comment>,
}

impl SqlTree {
    /// Parses one SQL statement.
    pub fn parse(sql: &str) -> Result<Self, SyntaxError> {
        let mut parser = Parser::new(sql);
        let statement = parser.parse()?;
        Ok(Self {
            source: sql.to_string(),
            statement,
            comments: parser.into_comments(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// All comments in the statement, in source order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the source text covered by `span`.
    pub fn text(&self, span: Span) -> &str {
        span.text(&self.source)
    }

    /// Returns the root node of the tree.
    pub fn root(&self) -> Node<'_> {
        Node::Statement(&self.statement)
    }
}

impl FromStr for SqlTree {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The kind of a [`Node`], compared during lockstep walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Select,
    Insert,
    Update,
    Delete,
    Begin,
    Commit,
    Rollback,
    Other,
    SelectItem,
    Table,
    Join,
    TableName,
    Ident,
    OrderBy,
    Limit,
    ValueRow,
    Assignment,
    Literal,
    Column,
    Function,
    Nested,
    Unary(UnaryOperator),
    Binary(BinaryOperator),
    InList { negated: bool },
    Like { negated: bool },
    Between { negated: bool },
    IsNull { negated: bool },
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Unary(op) => write!(f, "unary {op:?}"),
            NodeKind::Binary(op) => write!(f, "binary {op:?}"),
            NodeKind::InList { negated: true } => f.write_str("NOT IN"),
            NodeKind::InList { negated: false } => f.write_str("IN"),
            NodeKind::Like { negated: true } => f.write_str("NOT LIKE"),
            NodeKind::Like { negated: false } => f.write_str("LIKE"),
            NodeKind::Between { negated: true } => f.write_str("NOT BETWEEN"),
            NodeKind::Between { negated: false } => f.write_str("BETWEEN"),
            NodeKind::IsNull { negated: true } => f.write_str("IS NOT NULL"),
            NodeKind::IsNull { negated: false } => f.write_str("IS NULL"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// A borrowed view of one AST node.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Statement(&'a Statement),
    Select(&'a SelectStmt),
    Insert(&'a InsertStmt),
    Update(&'a UpdateStmt),
    Delete(&'a DeleteStmt),
    SelectItem(&'a SelectItem),
    TableRef(&'a TableRef),
    TableName(&'a ObjectName),
    Ident(&'a Ident),
    OrderBy(&'a OrderByItem),
    Limit(&'a LimitClause),
    ValueRow(&'a ValueRow),
    Assignment(&'a Assignment),
    Expr(&'a Expr),
    Literal(&'a Literal),
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match *self {
            Node::Statement(stmt) => match stmt {
                Statement::Select(_) => NodeKind::Select,
                Statement::Insert(_) => NodeKind::Insert,
                Statement::Update(_) => NodeKind::Update,
                Statement::Delete(_) => NodeKind::Delete,
                Statement::Begin(_) => NodeKind::Begin,
                Statement::Commit(_) => NodeKind::Commit,
                Statement::Rollback(_) => NodeKind::Rollback,
                Statement::Other(_) => NodeKind::Other,
            },
            Node::Select(_) => NodeKind::Select,
            Node::Insert(_) => NodeKind::Insert,
            Node::Update(_) => NodeKind::Update,
            Node::Delete(_) => NodeKind::Delete,
            Node::SelectItem(_) => NodeKind::SelectItem,
            Node::TableRef(TableRef::Table { .. }) => NodeKind::Table,
            Node::TableRef(TableRef::Join { .. }) => NodeKind::Join,
            Node::TableName(_) => NodeKind::TableName,
            Node::Ident(_) => NodeKind::Ident,
            Node::OrderBy(_) => NodeKind::OrderBy,
            Node::Limit(_) => NodeKind::Limit,
            Node::ValueRow(_) => NodeKind::ValueRow,
            Node::Assignment(_) => NodeKind::Assignment,
            Node::Literal(_) => NodeKind::Literal,
            Node::Expr(expr) => match expr {
                Expr::Literal(_) => NodeKind::Literal,
                Expr::Column(_) => NodeKind::Column,
                Expr::Function(_) => NodeKind::Function,
                Expr::Nested { .. } => NodeKind::Nested,
                Expr::UnaryOp { op, .. } => NodeKind::Unary(*op),
                Expr::BinaryOp { op, .. } => NodeKind::Binary(*op),
                Expr::InList { negated, .. } => NodeKind::InList { negated: *negated },
                Expr::Like { negated, .. } => NodeKind::Like { negated: *negated },
                Expr::Between { negated, .. } => NodeKind::Between { negated: *negated },
                Expr::IsNull { negated, .. } => NodeKind::IsNull { negated: *negated },
            },
        }
    }

    /// Returns the node's span in the statement source.
    pub fn span(&self) -> Span {
        match *self {
            Node::Statement(stmt) => stmt.span(),
            Node::Select(s) => s.span,
            Node::Insert(s) => s.span,
            Node::Update(s) => s.span,
            Node::Delete(s) => s.span,
            Node::SelectItem(item) => item.span(),
            Node::TableRef(table) => table.span(),
            Node::TableName(name) => name.span,
            Node::Ident(ident) => ident.span,
            Node::OrderBy(item) => item.span,
            Node::Limit(limit) => limit.span,
            Node::ValueRow(row) => row.span,
            Node::Assignment(a) => a.span,
            Node::Expr(expr) => expr.span(),
            Node::Literal(lit) => lit.span,
        }
    }

    /// Returns the literal behind this node, if it is one.
    pub fn as_literal(&self) -> Option<&'a Literal> {
        match *self {
            Node::Literal(lit) | Node::Expr(Expr::Literal(lit)) => Some(lit),
            _ => None,
        }
    }

    /// Returns the node's children in source order.
    pub fn children(&self) -> Vec<Node<'a>> {
        let mut out = Vec::new();
        match *self {
            Node::Statement(stmt) => match stmt {
                Statement::Select(s) => out.push(Node::Select(s)),
                Statement::Insert(s) => out.push(Node::Insert(s)),
                Statement::Update(s) => out.push(Node::Update(s)),
                Statement::Delete(s) => out.push(Node::Delete(s)),
                Statement::Begin(_) | Statement::Commit(_) | Statement::Rollback(_) => {}
                Statement::Other(s) => out.extend(s.placeholders.iter().map(Node::Literal)),
            },
            Node::Select(s) => {
                out.extend(s.columns.iter().map(Node::SelectItem));
                out.extend(s.from.iter().map(Node::TableRef));
                out.extend(s.where_clause.iter().map(Node::Expr));
                out.extend(s.group_by.iter().map(Node::Expr));
                out.extend(s.having.iter().map(Node::Expr));
                out.extend(s.order_by.iter().map(Node::OrderBy));
                out.extend(s.limit.iter().map(Node::Limit));
            }
            Node::Insert(s) => {
                out.push(Node::TableName(&s.table));
                out.extend(s.columns.iter().map(Node::Ident));
                match &s.source {
                    InsertSource::Values(rows) => out.extend(rows.iter().map(Node::ValueRow)),
                    InsertSource::Set(assignments) => {
                        out.extend(assignments.iter().map(Node::Assignment))
                    }
                    InsertSource::Select(select) => out.push(Node::Select(select)),
                }
                out.extend(s.on_duplicate.iter().map(Node::Assignment));
            }
            Node::Update(s) => {
                out.extend(s.tables.iter().map(Node::TableRef));
                out.extend(s.assignments.iter().map(Node::Assignment));
                out.extend(s.where_clause.iter().map(Node::Expr));
                out.extend(s.order_by.iter().map(Node::OrderBy));
                out.extend(s.limit.iter().map(Node::Limit));
            }
            Node::Delete(s) => {
                out.extend(s.targets.iter().map(Node::TableName));
                out.extend(s.from.iter().map(Node::TableRef));
                out.extend(s.where_clause.iter().map(Node::Expr));
                out.extend(s.order_by.iter().map(Node::OrderBy));
                out.extend(s.limit.iter().map(Node::Limit));
            }
            Node::SelectItem(item) => match item {
                SelectItem::Wildcard { .. } => {}
                SelectItem::QualifiedWildcard { qualifier, .. } => {
                    out.push(Node::TableName(qualifier))
                }
                SelectItem::Expr { expr, alias, .. } => {
                    out.push(Node::Expr(expr));
                    out.extend(alias.iter().map(Node::Ident));
                }
            },
            Node::TableRef(table) => match table {
                TableRef::Table { name, alias, .. } => {
                    out.push(Node::TableName(name));
                    out.extend(alias.iter().map(Node::Ident));
                }
                TableRef::Join {
                    left,
                    right,
                    condition,
                    ..
                } => {
                    out.push(Node::TableRef(left));
                    out.push(Node::TableRef(right));
                    match condition {
                        Some(JoinCondition::On(expr)) => out.push(Node::Expr(expr)),
                        Some(JoinCondition::Using(columns)) => {
                            out.extend(columns.iter().map(Node::Ident))
                        }
                        None => {}
                    }
                }
            },
            Node::TableName(name) => out.extend(name.parts.iter().map(Node::Ident)),
            Node::Ident(_) | Node::Literal(_) => {}
            Node::OrderBy(item) => out.push(Node::Expr(&item.expr)),
            Node::Limit(limit) => {
                out.push(Node::Literal(&limit.limit));
                out.extend(limit.offset.iter().map(Node::Literal));
            }
            Node::ValueRow(row) => out.extend(row.values.iter().map(Node::Expr)),
            Node::Assignment(a) => {
                out.push(Node::TableName(&a.column));
                out.push(Node::Expr(&a.value));
            }
            Node::Expr(expr) => match expr {
                Expr::Literal(_) => {}
                Expr::Column(col) => out.extend(col.name.parts.iter().map(Node::Ident)),
                Expr::Function(call) => match &call.args {
                    FunctionArgs::Star { .. } => {}
                    FunctionArgs::List(args) => out.extend(args.iter().map(Node::Expr)),
                },
                Expr::Nested { expr, .. } => out.push(Node::Expr(expr)),
                Expr::UnaryOp { operand, .. } => out.push(Node::Expr(operand)),
                Expr::BinaryOp { left, right, .. } => {
                    out.push(Node::Expr(left));
                    out.push(Node::Expr(right));
                }
                Expr::InList { expr, list, .. } => {
                    out.push(Node::Expr(expr));
                    out.extend(list.iter().map(Node::Expr));
                }
                Expr::Like {
                    expr,
                    pattern,
                    escape,
                    ..
                } => {
                    out.push(Node::Expr(expr));
                    out.push(Node::Expr(pattern));
                    out.extend(escape.iter().map(|e| Node::Expr(e)));
                }
                Expr::Between {
                    expr, low, high, ..
                } => {
                    out.push(Node::Expr(expr));
                    out.push(Node::Expr(low));
                    out.push(Node::Expr(high));
                }
                Expr::IsNull { expr, .. } => out.push(Node::Expr(expr)),
            },
        }
        out
    }

    /// Visits this node and all of its descendants in source order.
    pub fn walk(&self, visit: &mut impl FnMut(Node<'a>)) {
        visit(*self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_text() {
        let tree: SqlTree = "SELECT a FROM t WHERE b = 1".parse().unwrap();
        assert_eq!(tree.source(), "SELECT a FROM t WHERE b = 1");
        assert_eq!(tree.text(Span::new(7, 8)), "a");
        assert_eq!(tree.root().kind(), NodeKind::Select);
    }

    #[test]
    fn test_children_in_source_order() {
        let tree = SqlTree::parse("SELECT a, b FROM t WHERE c = 1 LIMIT 2").unwrap();
        let select = tree.root().children();
        assert_eq!(select.len(), 1);

        let kinds: Vec<_> = select[0].children().iter().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::SelectItem,
                NodeKind::SelectItem,
                NodeKind::Table,
                NodeKind::Binary(BinaryOperator::Eq),
                NodeKind::Limit,
            ]
        );
    }

    #[test]
    fn test_walk_reaches_every_literal() {
        let tree = SqlTree::parse("UPDATE t SET a = ? WHERE b IN (1, ?) LIMIT ?").unwrap();
        let mut placeholders = Vec::new();
        tree.root().walk(&mut |node| {
            if let Some(lit) = node.as_literal() {
                if lit.is_placeholder() {
                    placeholders.push(lit.span.start);
                }
            }
        });
        assert_eq!(placeholders, vec![17, 34, 43]);
    }

    #[test]
    fn test_node_kind_display() {
        assert_eq!(NodeKind::InList { negated: true }.to_string(), "NOT IN");
        assert_eq!(NodeKind::Literal.to_string(), "Literal");
        assert_eq!(
            NodeKind::Binary(BinaryOperator::Add).to_string(),
            "binary Add"
        );
    }
}
