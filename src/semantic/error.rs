use thiserror::Error;

/// Why a statement could not be summarized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// The statement uses a shape this layer does not model, such as a
    /// multi-table UPDATE or an INSERT without a VALUES list.
    #[error("unsupported {statement}: {reason}")]
    UnsupportedStatementShape {
        statement: &'static str,
        reason: String,
    },

    /// An INSERT tuple's value count differs from the declared column count.
    #[error("invalid query: row {row} has {found} values, expected {expected}")]
    ArityMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A clause item reduces to something other than what the clause accepts.
    #[error("unsupported {clause}: `{fragment}`")]
    UnsupportedClause {
        clause: &'static str,
        fragment: String,
    },

    /// An expression node the model has no representation for.
    #[error("unsupported expression: `{fragment}`")]
    UnsupportedExpression { fragment: String },
}

impl SemanticError {
    pub(crate) fn shape(statement: &'static str, reason: impl Into<String>) -> Self {
        Self::UnsupportedStatementShape {
            statement,
            reason: reason.into(),
        }
    }

    pub(crate) fn clause(clause: &'static str, fragment: impl Into<String>) -> Self {
        Self::UnsupportedClause {
            clause,
            fragment: fragment.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            SemanticError::shape("update", "multi-table update").to_string(),
            "unsupported update: multi-table update"
        );
        assert_eq!(
            SemanticError::ArityMismatch {
                row: 1,
                expected: 2,
                found: 3
            }
            .to_string(),
            "invalid query: row 1 has 3 values, expected 2"
        );
        assert_eq!(
            SemanticError::clause("GROUP BY", "a + 1").to_string(),
            "unsupported GROUP BY: `a + 1`"
        );
    }
}
