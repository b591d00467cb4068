//! SQL front-end for a MySQL sharding proxy.
//!
//! Statements are parsed once into an immutable [`SqlTree`]. From there:
//!
//! - [`semantic`] classifies the statement, reads proxy hints and summarizes
//!   SELECT, INSERT, UPDATE and DELETE statements;
//! - [`binder`] extracts or substitutes `?` placeholder arguments;
//! - [`rewrite`] retargets a statement to one physical database and table.
//!
//! ```
//! use sqlshard::{RewriteOptions, Rewriter, SqlTree};
//!
//! let tree = SqlTree::parse("SELECT AVG(age) FROM users WHERE id > 10").unwrap();
//! let sql = Rewriter::new(&tree, RewriteOptions::new("shard_0", "users_3"))
//!     .rewrite()
//!     .unwrap();
//! assert_eq!(
//!     sql,
//!     "SELECT AVG(age),SUM(age),COUNT(age) FROM `shard_0`.`users_3` WHERE id > 10"
//! );
//! ```

pub mod binder;
pub mod rewrite;
pub mod semantic;
pub mod sql;

pub use binder::{BindError, BindResult, Extraction, extract, substitute};
pub use rewrite::{LimitOverride, RewriteError, RewriteOptions, Rewriter};
pub use semantic::{SemanticError, StatementKind, classify, extract_hints};
pub use sql::{SqlTree, SyntaxError};

use thiserror::Error;

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

pub type Result<T> = std::result::Result<T, Error>;
