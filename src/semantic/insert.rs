use std::collections::HashMap;

use crate::sql::{InsertSource, SqlTree, Statement, ValueRow};

use super::builder::{ExprBuilder, literal_value};
use super::error::SemanticError;
use super::expr::{TableName, Value};

/// Summary of an `INSERT ... VALUES` statement.
///
/// `row_subtrees` borrows each tuple from the tree so a caller can hand a
/// subset of them back to the rewriter.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertSemantics<'t> {
    pub table: TableName,
    pub columns: Vec<String>,
    pub rows: Vec<HashMap<String, Value>>,
    pub row_subtrees: Vec<&'t ValueRow>,
}

impl<'t> InsertSemantics<'t> {
    pub fn from_tree(tree: &'t SqlTree) -> Result<Self, SemanticError> {
        let Statement::Insert(insert) = tree.statement() else {
            return Err(SemanticError::shape("insert", "not an INSERT statement"));
        };
        let InsertSource::Values(tuples) = &insert.source else {
            return Err(SemanticError::shape(
                "insert",
                "only INSERT ... VALUES is supported",
            ));
        };
        let builder = ExprBuilder::for_tree(tree);

        let columns: Vec<String> = insert.columns.iter().map(|c| c.value.clone()).collect();
        let mut rows = Vec::with_capacity(tuples.len());
        for (index, tuple) in tuples.iter().enumerate() {
            if tuple.values.len() != columns.len() {
                return Err(SemanticError::ArityMismatch {
                    row: index,
                    expected: columns.len(),
                    found: tuple.values.len(),
                });
            }
            let mut row = HashMap::with_capacity(columns.len());
            for (column, expr) in columns.iter().zip(&tuple.values) {
                let value = literal_value(expr)
                    .ok_or_else(|| SemanticError::clause("VALUES", builder.fragment(expr)))?;
                row.insert(column.clone(), value);
            }
            rows.push(row);
        }

        Ok(Self {
            table: TableName::from_name(&insert.table),
            columns,
            rows,
            row_subtrees: tuples.iter().collect(),
        })
    }

    /// Returns the value of `column` in row `index`.
    pub fn value(&self, index: usize, column: &str) -> Option<&Value> {
        self.rows.get(index)?.get(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_keyed_by_columns() {
        let tree = SqlTree::parse(
            "INSERT INTO `db`.`t` (`id`, name) VALUES (1, 'a'), (2, NULL), (-3, \"c\")",
        )
        .unwrap();
        let s = InsertSemantics::from_tree(&tree).unwrap();
        assert_eq!(
            s.table,
            TableName {
                database: Some("db".into()),
                name: "t".into()
            }
        );
        assert_eq!(s.columns, vec!["id", "name"]);
        assert_eq!(s.rows.len(), 3);
        assert_eq!(s.value(0, "name"), Some(&Value::String("a".into())));
        assert_eq!(s.value(1, "name"), Some(&Value::Null));
        assert_eq!(s.value(2, "id"), Some(&Value::Integer(-3)));
        assert_eq!(s.row_subtrees.len(), 3);
        assert_eq!(tree.text(s.row_subtrees[1].span), "(2, NULL)");
    }

    #[test]
    fn test_arity_mismatch() {
        let tree = SqlTree::parse("INSERT INTO t (a, b) VALUES (1, 2), (3)").unwrap();
        let err = InsertSemantics::from_tree(&tree).unwrap_err();
        assert_eq!(
            err,
            SemanticError::ArityMismatch {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert!(err.to_string().starts_with("invalid query"));
    }

    #[test]
    fn test_omitted_columns() {
        let tree = SqlTree::parse("INSERT INTO t VALUES (1)").unwrap();
        let err = InsertSemantics::from_tree(&tree).unwrap_err();
        assert!(matches!(err, SemanticError::ArityMismatch { expected: 0, .. }));
    }

    #[test]
    fn test_non_literal_value() {
        let tree = SqlTree::parse("INSERT INTO t (a) VALUE (now())").unwrap();
        let err = InsertSemantics::from_tree(&tree).unwrap_err();
        assert_eq!(err, SemanticError::clause("VALUES", "now()"));
    }

    #[test]
    fn test_unsupported_sources() {
        for sql in [
            "INSERT INTO t SET a = 1",
            "INSERT INTO t (a) SELECT a FROM s",
            "SELECT 1",
        ] {
            let tree = SqlTree::parse(sql).unwrap();
            let err = InsertSemantics::from_tree(&tree).unwrap_err();
            assert!(matches!(err, SemanticError::UnsupportedStatementShape { .. }), "{sql}");
        }
    }
}
