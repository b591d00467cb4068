use crate::sql::{self, LimitClause, LiteralKind, SelectItem, SortDirection, SqlTree, Statement};

use super::builder::{ExprBuilder, literal_value, qualified_name};
use super::error::SemanticError;
use super::expr::{Aggregate, AggregateFunction, Column, Expr, Value};

/// One element of a SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub enum Selectable {
    Column(Column),
    Aggregate(Aggregate),
    Value(Value),
}

impl Selectable {
    pub fn alias(&self) -> Option<&str> {
        match self {
            Selectable::Column(c) => c.alias.as_deref(),
            Selectable::Aggregate(a) => a.alias.as_deref(),
            Selectable::Value(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub name: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub limit: u64,
    pub offset: u64,
}

/// Summary of a SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectSemantics {
    pub columns: Vec<Selectable>,
    pub predicate: Option<Expr>,
    pub having: Option<Expr>,
    pub distinct: bool,
    pub group_by: Vec<String>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Limit>,
}

impl SelectSemantics {
    pub fn from_tree(tree: &SqlTree) -> Result<Self, SemanticError> {
        let Statement::Select(select) = tree.statement() else {
            return Err(SemanticError::shape("select", "not a SELECT statement"));
        };
        let builder = ExprBuilder::for_tree(tree);

        let columns = select
            .columns
            .iter()
            .map(|item| select_item(&builder, tree, item))
            .collect::<Result<Vec<_>, _>>()?;
        let predicate = select
            .where_clause
            .as_ref()
            .map(|e| builder.build(e))
            .transpose()?;
        let having = select
            .having
            .as_ref()
            .map(|e| builder.build(e))
            .transpose()?;
        let group_by = select
            .group_by
            .iter()
            .map(|e| sort_key(&builder, "GROUP BY", e))
            .collect::<Result<Vec<_>, _>>()?;
        let order_by = select
            .order_by
            .iter()
            .map(|item| {
                Ok(OrderBy {
                    name: sort_key(&builder, "ORDER BY", &item.expr)?,
                    direction: item.direction,
                })
            })
            .collect::<Result<Vec<_>, SemanticError>>()?;
        let limit = select
            .limit
            .as_ref()
            .map(|l| limit(tree, l))
            .transpose()?;

        Ok(Self {
            columns,
            predicate,
            having,
            distinct: select.distinct,
            group_by,
            order_by,
            limit,
        })
    }

    /// Returns true if any select item is an AVG aggregate.
    pub fn has_average(&self) -> bool {
        self.columns.iter().any(|c| {
            matches!(
                c,
                Selectable::Aggregate(Aggregate {
                    function: AggregateFunction::Avg,
                    ..
                })
            )
        })
    }
}

fn select_item(
    builder: &ExprBuilder<'_>,
    tree: &SqlTree,
    item: &SelectItem,
) -> Result<Selectable, SemanticError> {
    match item {
        SelectItem::Wildcard { .. } => Ok(Selectable::Column(Column::new("*"))),
        SelectItem::QualifiedWildcard { qualifier, .. } => {
            let mut column = Column::new("*");
            column.qualifier = Some(qualified_name(qualifier));
            Ok(Selectable::Column(column))
        }
        SelectItem::Expr { expr, alias, span } => {
            let alias = alias.as_ref().map(|a| a.value.clone());
            match expr {
                sql::Expr::Column(col) => {
                    Ok(Selectable::Column(Column::from_name(&col.name).with_alias(alias)))
                }
                sql::Expr::Function(call) if AggregateFunction::parse(&call.name.value).is_some() => {
                    builder.build_aggregate(call, alias).map(Selectable::Aggregate)
                }
                other => literal_value(other)
                    .map(Selectable::Value)
                    .ok_or_else(|| SemanticError::clause("select list", tree.text(*span))),
            }
        }
    }
}

/// Reduces a GROUP BY or ORDER BY item to a column name.
fn sort_key(
    builder: &ExprBuilder<'_>,
    clause: &'static str,
    expr: &sql::Expr,
) -> Result<String, SemanticError> {
    match expr {
        sql::Expr::Column(col) => Ok(col.name.name().value.clone()),
        sql::Expr::Literal(lit) => match &lit.kind {
            LiteralKind::String(s) => Ok(s.clone()),
            _ => Err(SemanticError::clause(clause, builder.fragment(expr))),
        },
        _ => Err(SemanticError::clause(clause, builder.fragment(expr))),
    }
}

fn limit(tree: &SqlTree, clause: &LimitClause) -> Result<Limit, SemanticError> {
    let operand = |lit: &sql::Literal| match lit.kind {
        LiteralKind::Integer(n) => u64::try_from(n).ok(),
        _ => None,
    };
    let unsupported = || SemanticError::clause("LIMIT", tree.text(clause.span));

    let limit = operand(&clause.limit).ok_or_else(unsupported)?;
    let offset = match &clause.offset {
        Some(lit) => operand(lit).ok_or_else(unsupported)?,
        None => 0,
    };
    Ok(Limit { limit, offset })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::expr::{AggregateArg, Operator};

    fn analyze(sql: &str) -> Result<SelectSemantics, SemanticError> {
        SelectSemantics::from_tree(&SqlTree::parse(sql).unwrap())
    }

    #[test]
    fn test_columns_and_aggregates() {
        let s = analyze("SELECT DISTINCT id AS i, `t`.`name`, avg(DISTINCT age) a, COUNT(*), 1, *, t.* FROM t")
            .unwrap();
        assert!(s.distinct);
        assert_eq!(s.columns.len(), 7);
        assert_eq!(
            s.columns[0],
            Selectable::Column(Column::new("id").with_alias(Some("i".into())))
        );
        let Selectable::Column(name) = &s.columns[1] else {
            panic!("expected column");
        };
        assert_eq!(name.name, "name");
        assert_eq!(name.qualifier.as_deref(), Some("t"));
        assert_eq!(
            s.columns[2],
            Selectable::Aggregate(Aggregate {
                function: AggregateFunction::Avg,
                arg: AggregateArg::Column("age".into()),
                alias: Some("a".into()),
                distinct: true,
            })
        );
        assert!(matches!(
            &s.columns[3],
            Selectable::Aggregate(Aggregate {
                function: AggregateFunction::Count,
                arg: AggregateArg::Star,
                ..
            })
        ));
        assert_eq!(s.columns[4], Selectable::Value(Value::Integer(1)));
        assert_eq!(s.columns[5], Selectable::Column(Column::new("*")));
        assert!(s.has_average());
    }

    #[test]
    fn test_unsupported_select_item() {
        let err = analyze("SELECT a + 1 AS b FROM t").unwrap_err();
        assert_eq!(err, SemanticError::clause("select list", "a + 1 AS b"));
    }

    #[test]
    fn test_where_and_having() {
        let s = analyze("SELECT a FROM t WHERE id > 10 GROUP BY a HAVING count(*) > 1").unwrap();
        assert_eq!(s.predicate.unwrap().as_predicate().unwrap().op, Operator::Gt);
        assert!(s.having.is_some());

        let s = analyze("SELECT a FROM t").unwrap();
        assert_eq!(s.predicate, None);
        assert_eq!(s.limit, None);
    }

    #[test]
    fn test_group_and_order() {
        let s = analyze("SELECT a FROM t GROUP BY `a`, 'b' ORDER BY a DESC, t.b").unwrap();
        assert_eq!(s.group_by, vec!["a", "b"]);
        assert_eq!(
            s.order_by,
            vec![
                OrderBy {
                    name: "a".into(),
                    direction: SortDirection::Desc
                },
                OrderBy {
                    name: "b".into(),
                    direction: SortDirection::Asc
                },
            ]
        );

        let err = analyze("SELECT a FROM t ORDER BY a + 1").unwrap_err();
        assert_eq!(err, SemanticError::clause("ORDER BY", "a + 1"));
        let err = analyze("SELECT a FROM t GROUP BY 1").unwrap_err();
        assert_eq!(err, SemanticError::clause("GROUP BY", "1"));
    }

    #[test]
    fn test_limit_forms() {
        let s = analyze("SELECT a FROM t LIMIT 10").unwrap();
        assert_eq!(s.limit, Some(Limit { limit: 10, offset: 0 }));
        let s = analyze("SELECT a FROM t LIMIT 10 OFFSET 5").unwrap();
        assert_eq!(s.limit, Some(Limit { limit: 10, offset: 5 }));
        let s = analyze("SELECT a FROM t LIMIT 5, 10").unwrap();
        assert_eq!(s.limit, Some(Limit { limit: 10, offset: 5 }));

        let err = analyze("SELECT a FROM t LIMIT ?").unwrap_err();
        assert!(matches!(err, SemanticError::UnsupportedClause { clause: "LIMIT", .. }));
    }

    #[test]
    fn test_wrong_statement_kind() {
        let err = analyze("DELETE FROM t").unwrap_err();
        assert!(matches!(err, SemanticError::UnsupportedStatementShape { .. }));
    }
}
