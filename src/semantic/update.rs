use crate::sql::{SqlTree, Statement};

use super::builder::ExprBuilder;
use super::error::SemanticError;
use super::expr::{Assignment, Column, Expr, TableName};

/// Summary of a single-table UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSemantics {
    pub table: TableName,
    pub assignments: Vec<Assignment>,
    pub predicate: Option<Expr>,
}

impl UpdateSemantics {
    pub fn from_tree(tree: &SqlTree) -> Result<Self, SemanticError> {
        let Statement::Update(update) = tree.statement() else {
            return Err(SemanticError::shape("update", "not an UPDATE statement"));
        };
        let table = update
            .single_table()
            .ok_or_else(|| SemanticError::shape("update", "multi-table update"))?;
        let builder = ExprBuilder::for_tree(tree);

        let assignments = update
            .assignments
            .iter()
            .map(|a| Ok(Assignment::new(Column::from_name(&a.column), builder.build(&a.value)?)))
            .collect::<Result<Vec<_>, SemanticError>>()?;
        let predicate = update
            .where_clause
            .as_ref()
            .map(|e| builder.build(e))
            .transpose()?;

        Ok(Self {
            table: TableName::from_name(table),
            assignments,
            predicate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::expr::{Operator, Value};

    #[test]
    fn test_single_table_update() {
        let tree = SqlTree::parse("UPDATE t SET `a` = 1, b = b + 1 WHERE id = 5").unwrap();
        let s = UpdateSemantics::from_tree(&tree).unwrap();
        assert_eq!(s.table.name, "t");
        assert_eq!(
            s.assignments,
            vec![
                Assignment::new(Column::new("a"), Expr::Value(Value::Integer(1))),
                Assignment::new(
                    Column::new("b"),
                    Expr::predicate(Expr::column("b"), Operator::Add, Expr::Value(Value::Integer(1)))
                ),
            ]
        );
        assert_eq!(
            s.predicate,
            Some(Expr::predicate(
                Expr::column("id"),
                Operator::Eq,
                Expr::Value(Value::Integer(5))
            ))
        );
    }

    #[test]
    fn test_multi_table_update_is_rejected() {
        for sql in [
            "UPDATE t1, t2 SET t1.a = t2.a",
            "UPDATE t1 JOIN t2 ON t1.id = t2.id SET t1.a = 1",
        ] {
            let tree = SqlTree::parse(sql).unwrap();
            let err = UpdateSemantics::from_tree(&tree).unwrap_err();
            assert_eq!(err.to_string(), "unsupported update: multi-table update");
        }
    }
}
