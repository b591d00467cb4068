use crate::sql::{SqlTree, Statement};

use super::builder::ExprBuilder;
use super::error::SemanticError;
use super::expr::{Expr, TableName};

/// Summary of a single-table DELETE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteSemantics {
    pub table: TableName,
    pub predicate: Option<Expr>,
}

impl DeleteSemantics {
    pub fn from_tree(tree: &SqlTree) -> Result<Self, SemanticError> {
        let Statement::Delete(delete) = tree.statement() else {
            return Err(SemanticError::shape("delete", "not a DELETE statement"));
        };
        let table = delete
            .single_table()
            .ok_or_else(|| SemanticError::shape("delete", "multi-table delete"))?;
        let predicate = delete
            .where_clause
            .as_ref()
            .map(|e| ExprBuilder::for_tree(tree).build(e))
            .transpose()?;

        Ok(Self {
            table: TableName::from_name(table),
            predicate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::expr::Operator;

    #[test]
    fn test_delete_predicate() {
        let tree = SqlTree::parse("DELETE FROM db.t WHERE a LIKE 'x%' OR b IS NULL").unwrap();
        let s = DeleteSemantics::from_tree(&tree).unwrap();
        assert_eq!(s.table.database.as_deref(), Some("db"));
        assert_eq!(s.predicate.unwrap().as_predicate().unwrap().op, Operator::Or);

        let tree = SqlTree::parse("DELETE FROM t").unwrap();
        assert_eq!(DeleteSemantics::from_tree(&tree).unwrap().predicate, None);
    }

    #[test]
    fn test_multi_table_delete_is_rejected() {
        for sql in [
            "DELETE t1 FROM t1 JOIN t2 ON t1.id = t2.id",
            "DELETE FROM t1 USING t1, t2 WHERE t1.id = t2.id",
            "DELETE FROM t1, t2",
        ] {
            let tree = SqlTree::parse(sql).unwrap();
            let err = DeleteSemantics::from_tree(&tree).unwrap_err();
            assert!(matches!(err, SemanticError::UnsupportedStatementShape { .. }), "{sql}");
        }
    }
}
