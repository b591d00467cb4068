//! Semantic summaries of parsed statements.
//!
//! Each visitor reads a [`SqlTree`](crate::sql::SqlTree) and produces a fresh,
//! caller-owned record: column lists, predicates as [`Expr`] trees, insert rows
//! keyed by column, and so on. Nothing here mutates the tree.

mod builder;
mod classify;
mod delete;
mod error;
mod expr;
mod hint;
mod insert;
mod prepare;
mod select;
mod update;

pub use builder::ExprBuilder;
pub use classify::{StatementKind, classify};
pub use delete::DeleteSemantics;
pub use error::SemanticError;
pub use expr::{
    Aggregate, AggregateArg, AggregateFunction, Assignment, Column, Expr, Operator, Predicate,
    RawExpr, TableName, Value,
};
pub use hint::{Hints, extract_hints};
pub use insert::InsertSemantics;
pub use prepare::PrepareSemantics;
pub use select::{Limit, OrderBy, SelectSemantics, Selectable};
pub use update::UpdateSemantics;

pub(crate) use prepare::placeholders;
