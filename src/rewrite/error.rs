use thiserror::Error;

use crate::sql::EditConflict;

/// Errors from planning a shard rewrite. No text is produced when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    #[error("cannot rewrite {statement}: {reason}")]
    UnsupportedStatement {
        statement: &'static str,
        reason: String,
    },

    #[error("invalid rewrite options: {0}")]
    InvalidOptions(String),

    /// A selected row does not belong to the statement being rewritten.
    #[error("selected row {index} does not belong to this statement")]
    ForeignRow { index: usize },

    #[error(transparent)]
    Edit(#[from] EditConflict),
}

impl RewriteError {
    pub(crate) fn unsupported(statement: &'static str, reason: impl Into<String>) -> Self {
        Self::UnsupportedStatement {
            statement,
            reason: reason.into(),
        }
    }
}
