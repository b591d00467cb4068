use std::fmt;

use crate::sql::{SqlTree, Statement};

/// The kind of a parsed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Update,
    Delete,
    Insert,
    StartTransaction,
    Commit,
    Rollback,
    Unknown,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Select => "select",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
            StatementKind::Insert => "insert",
            StatementKind::StartTransaction => "start transaction",
            StatementKind::Commit => "commit",
            StatementKind::Rollback => "rollback",
            StatementKind::Unknown => "unknown",
        }
    }

    /// Returns true for BEGIN/START TRANSACTION, COMMIT and ROLLBACK.
    pub fn is_transaction_control(&self) -> bool {
        matches!(
            self,
            StatementKind::StartTransaction | StatementKind::Commit | StatementKind::Rollback
        )
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&Statement> for StatementKind {
    fn from(stmt: &Statement) -> Self {
        match stmt {
            Statement::Select(_) => StatementKind::Select,
            Statement::Insert(_) => StatementKind::Insert,
            Statement::Update(_) => StatementKind::Update,
            Statement::Delete(_) => StatementKind::Delete,
            Statement::Begin(_) => StatementKind::StartTransaction,
            Statement::Commit(_) => StatementKind::Commit,
            Statement::Rollback(_) => StatementKind::Rollback,
            Statement::Other(_) => StatementKind::Unknown,
        }
    }
}

/// Classifies a parsed statement.
pub fn classify(tree: &SqlTree) -> StatementKind {
    StatementKind::from(tree.statement())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(sql: &str) -> StatementKind {
        classify(&SqlTree::parse(sql).unwrap())
    }

    #[test]
    fn test_classify() {
        assert_eq!(kind("SELECT 1"), StatementKind::Select);
        assert_eq!(kind("insert into t (a) values (1)"), StatementKind::Insert);
        assert_eq!(kind("UPDATE t SET a = 1"), StatementKind::Update);
        assert_eq!(kind("DELETE FROM t"), StatementKind::Delete);
        assert_eq!(kind("BEGIN"), StatementKind::StartTransaction);
        assert_eq!(kind("START TRANSACTION"), StatementKind::StartTransaction);
        assert_eq!(kind("COMMIT"), StatementKind::Commit);
        assert_eq!(kind("ROLLBACK WORK"), StatementKind::Rollback);
        assert_eq!(kind("SHOW TABLES"), StatementKind::Unknown);
    }

    #[test]
    fn test_transaction_control() {
        assert!(StatementKind::Commit.is_transaction_control());
        assert!(!StatementKind::Select.is_transaction_control());
        assert_eq!(StatementKind::StartTransaction.to_string(), "start transaction");
    }
}
