//! Shard rewriting of parsed statements.
//!
//! A [`Rewriter`] plans span edits against an immutable [`SqlTree`] and splices
//! them into a copy of the source. Planning fails before any text is produced,
//! so a rewrite either succeeds completely or returns an error.

mod error;
mod insert;
mod options;
mod select;
mod table;

pub use error::RewriteError;
pub use options::{LimitOverride, RewriteOptions};

use crate::sql::{EditList, InsertSource, SqlTree, Statement, ValueRow};

/// Rewrites one statement for one physical shard.
#[derive(Debug, Clone)]
pub struct Rewriter<'t> {
    tree: &'t SqlTree,
    options: RewriteOptions,
    rows: Option<Vec<&'t ValueRow>>,
}

impl<'t> Rewriter<'t> {
    /// Creates a rewriter for `tree` that keeps every INSERT row.
    pub fn new(tree: &'t SqlTree, options: RewriteOptions) -> Self {
        Self {
            tree,
            options,
            rows: None,
        }
    }

    /// Restricts an INSERT to the given VALUES tuples, which must come from
    /// this rewriter's tree (see
    /// [`InsertSemantics::row_subtrees`](crate::semantic::InsertSemantics)).
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = &'t ValueRow>) -> Self {
        self.rows = Some(rows.into_iter().collect());
        self
    }

    /// The target shard and rewrite switches.
    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Produces the rewritten statement text.
    pub fn rewrite(&self) -> Result<String, RewriteError> {
        let edits = self.plan()?;
        tracing::debug!(
            database = %self.options.database,
            table = %self.options.table,
            edits = edits.len(),
            "rewrote statement"
        );
        Ok(edits.apply(self.tree.source())?)
    }

    /// Computes the edits without applying them.
    pub fn plan(&self) -> Result<EditList, RewriteError> {
        if self.options.table.is_empty() {
            return Err(RewriteError::InvalidOptions("target table is empty".into()));
        }

        let mut edits = EditList::new();
        match self.tree.statement() {
            Statement::Select(stmt) => {
                let name = stmt.single_table().ok_or_else(|| {
                    RewriteError::unsupported("select", "statement must read from exactly one table")
                })?;
                table::rewrite_table(name, &self.options, &mut edits);
                if !self.options.columns_finalized {
                    select::expand_averages(self.tree, stmt, &mut edits)?;
                }
                if let Some(limit) = self.options.limit {
                    select::override_limit(self.tree, stmt, limit, &mut edits);
                }
            }
            Statement::Insert(stmt) => {
                table::rewrite_table(&stmt.table, &self.options, &mut edits);
                if let Some(rows) = &self.rows {
                    let InsertSource::Values(tuples) = &stmt.source else {
                        return Err(RewriteError::unsupported(
                            "insert",
                            "row selection requires a VALUES list",
                        ));
                    };
                    insert::select_rows(self.tree, tuples, rows, &mut edits)?;
                }
            }
            Statement::Update(stmt) => {
                let name = stmt
                    .single_table()
                    .ok_or_else(|| RewriteError::unsupported("update", "multi-table update"))?;
                table::rewrite_table(name, &self.options, &mut edits);
            }
            Statement::Delete(stmt) => {
                let name = stmt
                    .single_table()
                    .ok_or_else(|| RewriteError::unsupported("delete", "multi-table delete"))?;
                table::rewrite_table(name, &self.options, &mut edits);
            }
            Statement::Begin(_) | Statement::Commit(_) | Statement::Rollback(_) => {
                return Err(RewriteError::unsupported(
                    "transaction",
                    "transaction statements have no table",
                ));
            }
            Statement::Other(other) => {
                return Err(RewriteError::unsupported(
                    "statement",
                    format!("`{}` statements are not modeled", other.keyword),
                ));
            }
        }
        Ok(edits)
    }
}
