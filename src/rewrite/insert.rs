use std::ptr;

use crate::sql::{EditList, Span, SqlTree, ValueRow};

use super::error::RewriteError;

/// Replaces the VALUES tuple list with the selected rows, in the given order.
///
/// Every selected row must be one of `tuples`, compared by identity.
pub(crate) fn select_rows(
    tree: &SqlTree,
    tuples: &[ValueRow],
    selected: &[&ValueRow],
    edits: &mut EditList,
) -> Result<(), RewriteError> {
    for (index, row) in selected.iter().enumerate() {
        if !tuples.iter().any(|t| ptr::eq(t, *row)) {
            return Err(RewriteError::ForeignRow { index });
        }
    }
    let (Some(first), Some(last)) = (tuples.first(), tuples.last()) else {
        return Err(RewriteError::unsupported("insert", "no VALUES rows"));
    };
    if selected.is_empty() {
        return Err(RewriteError::InvalidOptions("no rows selected".into()));
    }

    let rows: Vec<String> = selected
        .iter()
        .map(|row| format!("({})", tree.text(row.inner)))
        .collect();
    tracing::debug!(selected = rows.len(), total = tuples.len(), "rewriting insert rows");
    edits.replace(Span::new(first.span.start, last.span.end), rows.join(","));
    Ok(())
}
