use serde::{Deserialize, Serialize};

/// Target and behavior of one shard rewrite.
///
/// Deserializes with every field optional, so routing tables only need to
/// name what they set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteOptions {
    /// Physical database; empty writes the table unqualified.
    pub database: String,
    /// Physical table; must not be empty.
    pub table: String,
    /// Replaces any LIMIT clause of a SELECT.
    pub limit: Option<LimitOverride>,
    /// Skips the AVG expansion of the select list.
    pub columns_finalized: bool,
}

impl RewriteOptions {
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: u64, offset: u64) -> Self {
        self.limit = Some(LimitOverride { limit, offset });
        self
    }

    pub fn columns_finalized(mut self, finalized: bool) -> Self {
        self.columns_finalized = finalized;
        self
    }
}

/// The `LIMIT <limit> OFFSET <offset>` written by a rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOverride {
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let options = RewriteOptions::new("d0", "t1")
            .with_limit(10, 1)
            .columns_finalized(true);
        assert_eq!(options.database, "d0");
        assert_eq!(options.table, "t1");
        assert_eq!(options.limit, Some(LimitOverride { limit: 10, offset: 1 }));
        assert!(options.columns_finalized);
        assert_eq!(RewriteOptions::default().limit, None);
    }
}
