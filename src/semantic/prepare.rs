use crate::sql::{Literal, SqlTree};

/// Summary of a statement template sent for preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrepareSemantics {
    pub placeholder_count: usize,
}

impl PrepareSemantics {
    /// Counts the `?` placeholders of any statement, modeled or not.
    pub fn from_tree(tree: &SqlTree) -> Self {
        Self {
            placeholder_count: placeholders(tree).len(),
        }
    }
}

/// Returns every placeholder literal in document order.
pub(crate) fn placeholders(tree: &SqlTree) -> Vec<&Literal> {
    let mut found = Vec::new();
    tree.root().walk(&mut |node| {
        if let Some(lit) = node.as_literal() {
            if lit.is_placeholder() {
                found.push(lit);
            }
        }
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(sql: &str) -> usize {
        PrepareSemantics::from_tree(&SqlTree::parse(sql).unwrap()).placeholder_count
    }

    #[test]
    fn test_placeholder_count() {
        assert_eq!(count("SELECT * FROM t"), 0);
        assert_eq!(count("SELECT * FROM t WHERE a = ? AND b IN (?, ?) LIMIT ?"), 4);
        assert_eq!(count("INSERT INTO t (a, b) VALUES (?, ?), (?, 1)"), 3);
        assert_eq!(count("UPDATE t SET a = ? WHERE id = ?"), 2);
        assert_eq!(count("DELETE FROM t WHERE id BETWEEN ? AND ?"), 2);
        assert_eq!(count("CALL proc(?, ?)"), 2);
    }

    #[test]
    fn test_placeholders_in_document_order() {
        let tree = SqlTree::parse("UPDATE t SET a = ?, b = ? WHERE c = ?").unwrap();
        let starts: Vec<usize> = placeholders(&tree).iter().map(|l| l.span.start).collect();
        assert_eq!(starts, vec![17, 24, 36]);
    }
}
