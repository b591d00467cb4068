//! Integration tests for statement classification, hints and semantic
//! summaries, driven through the public API only.

use sqlshard::semantic::{
    Aggregate, AggregateArg, AggregateFunction, Column, DeleteSemantics, Expr, Hints,
    InsertSemantics, Limit, Operator, PrepareSemantics, RawExpr, SelectSemantics, Selectable,
    UpdateSemantics, Value,
};
use sqlshard::{SemanticError, SqlTree, StatementKind, classify, extract_hints};

fn tree(sql: &str) -> SqlTree {
    SqlTree::parse(sql).unwrap()
}

#[test]
fn test_classify_every_statement_kind() {
    let cases = [
        ("select * from t", StatementKind::Select),
        ("INSERT t (a) VALUES (1)", StatementKind::Insert),
        ("UPDATE t SET a = 1", StatementKind::Update),
        ("DELETE FROM t", StatementKind::Delete),
        ("START TRANSACTION", StatementKind::StartTransaction),
        ("begin work", StatementKind::StartTransaction),
        ("COMMIT;", StatementKind::Commit),
        ("ROLLBACK", StatementKind::Rollback),
        ("SET NAMES utf8mb4", StatementKind::Unknown),
    ];
    for (sql, expected) in cases {
        assert_eq!(classify(&tree(sql)), expected, "{sql}");
    }
}

#[test]
fn test_hint_round_trip_through_json() {
    let hints = extract_hints(&tree("SELECT /* @proxy k1=true;k2=222 */ * FROM t"));
    assert_eq!(
        serde_json::to_string(&hints).unwrap(),
        r#"{"k1":"true","k2":"222"}"#
    );

    let empty = extract_hints(&tree("SELECT * FROM t"));
    assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");

    let parsed: Hints = serde_json::from_str(r#"{"shard":"3"}"#).unwrap();
    assert_eq!(parsed.get_i64("shard"), Some(3));
}

#[test]
fn test_hint_after_other_comments() {
    let hints = extract_hints(&tree(
        "-- leading comment\nSELECT /* @proxy master=true */ a FROM t /* trailing */",
    ));
    assert_eq!(hints.get_bool("master"), Some(true));
    assert_eq!(hints.len(), 1);
}

#[test]
fn test_select_summary() {
    let tree = tree(
        "SELECT `city`, AVG(age) AS avg_age, COUNT(DISTINCT id) FROM users \
         WHERE age >= 18 AND name <> 'root' GROUP BY city HAVING COUNT(*) > 2 \
         ORDER BY `city` DESC LIMIT 20, 10",
    );
    let s = SelectSemantics::from_tree(&tree).unwrap();

    assert_eq!(
        s.columns,
        vec![
            Selectable::Column(Column::new("city")),
            Selectable::Aggregate(Aggregate {
                function: AggregateFunction::Avg,
                arg: AggregateArg::Column("age".into()),
                alias: Some("avg_age".into()),
                distinct: false,
            }),
            Selectable::Aggregate(Aggregate {
                function: AggregateFunction::Count,
                arg: AggregateArg::Column("id".into()),
                alias: None,
                distinct: true,
            }),
        ]
    );
    assert_eq!(
        s.predicate.as_ref().map(|p| p.to_string()).as_deref(),
        Some("((age >= 18) AND (name <> 'root'))")
    );
    assert_eq!(s.group_by, vec!["city"]);
    assert_eq!(s.order_by[0].name, "city");
    assert_eq!(s.limit, Some(Limit { limit: 10, offset: 20 }));
    assert!(s.having.is_some());
}

#[test]
fn test_not_wrapping_shape() {
    let tree = tree("SELECT * FROM t WHERE NOT (id > 10 AND c < 19)");
    let s = SelectSemantics::from_tree(&tree).unwrap();
    let expected = Expr::predicate(
        Expr::Raw(RawExpr::new("")),
        Operator::Not,
        Expr::predicate(
            Expr::predicate(Expr::column("id"), Operator::Gt, Expr::Value(Value::Integer(10))),
            Operator::And,
            Expr::predicate(Expr::column("c"), Operator::Lt, Expr::Value(Value::Integer(19))),
        ),
    );
    assert_eq!(s.predicate, Some(expected));
}

#[test]
fn test_precedence_shapes() {
    let tree = tree("SELECT * FROM t WHERE a + 1 + 1 >= 11 OR b = 2 AND c = 3");
    let s = SelectSemantics::from_tree(&tree).unwrap();
    assert_eq!(
        s.predicate.unwrap().to_string(),
        "((((a + 1) + 1) >= 11) OR ((b = 2) AND (c = 3)))"
    );
}

#[test]
fn test_insert_summary_keeps_row_subtrees() {
    let tree = tree("INSERT INTO t (id, name) VALUES (1, 'a'), (2, 'b')");
    let s = InsertSemantics::from_tree(&tree).unwrap();
    assert_eq!(s.rows[1]["id"], Value::Integer(2));
    assert_eq!(s.rows[1]["name"], Value::String("b".into()));
    assert_eq!(tree.text(s.row_subtrees[0].inner), "1, 'a'");
}

#[test]
fn test_insert_arity_error_message() {
    let tree = tree("INSERT INTO t (a) VALUES (1, 2)");
    let err = InsertSemantics::from_tree(&tree).unwrap_err();
    assert_eq!(err.to_string(), "invalid query: row 0 has 2 values, expected 1");
}

#[test]
fn test_update_and_delete_summaries() {
    let update = UpdateSemantics::from_tree(&tree("UPDATE t SET a = ?, b = NULL WHERE id = 1")).unwrap();
    assert_eq!(update.assignments.len(), 2);
    assert_eq!(update.assignments[0].right, Expr::Raw(RawExpr::new("?")));
    assert_eq!(update.assignments[1].op, Operator::Eq);

    let delete = DeleteSemantics::from_tree(&tree("DELETE FROM t WHERE id IN (1, 2)")).unwrap();
    assert_eq!(
        delete.predicate,
        Some(Expr::predicate(
            Expr::column("id"),
            Operator::In,
            Expr::Values(vec![Value::Integer(1), Value::Integer(2)]),
        ))
    );
}

#[test]
fn test_visitors_reject_wrong_statement() {
    let select = tree("SELECT 1");
    assert!(matches!(
        UpdateSemantics::from_tree(&select),
        Err(SemanticError::UnsupportedStatementShape { .. })
    ));
    assert!(matches!(
        DeleteSemantics::from_tree(&select),
        Err(SemanticError::UnsupportedStatementShape { .. })
    ));
    assert!(matches!(
        InsertSemantics::from_tree(&select),
        Err(SemanticError::UnsupportedStatementShape { .. })
    ));
}

#[test]
fn test_prepare_counts_placeholders() {
    let tree = tree("SELECT * FROM t WHERE a = ? AND b BETWEEN ? AND ? LIMIT ?, ?");
    assert_eq!(PrepareSemantics::from_tree(&tree).placeholder_count, 5);
}

#[test]
fn test_crate_error_wraps_module_errors() {
    fn analyze(sql: &str) -> sqlshard::Result<SelectSemantics> {
        let tree = SqlTree::parse(sql)?;
        Ok(SelectSemantics::from_tree(&tree)?)
    }

    assert!(matches!(analyze("SELECT FROM"), Err(sqlshard::Error::Syntax(_))));
    assert!(matches!(
        analyze("SELECT a FROM t WHERE a IN (b)"),
        Err(sqlshard::Error::Semantic(SemanticError::UnsupportedClause { clause: "IN list", .. }))
    ));
    assert!(analyze("SELECT a FROM t").is_ok());
}
