use crate::semantic::AggregateFunction;
use crate::sql::{self, EditList, SelectItem, SelectStmt, Span, SqlTree};

use super::error::RewriteError;
use super::options::LimitOverride;

/// Adds `,SUM(x),COUNT(x)` after every `AVG(x)` select item so partial
/// averages from several shards can be merged.
pub(crate) fn expand_averages(
    tree: &SqlTree,
    select: &SelectStmt,
    edits: &mut EditList,
) -> Result<(), RewriteError> {
    for item in &select.columns {
        let SelectItem::Expr {
            expr: sql::Expr::Function(call),
            span,
            ..
        } = item
        else {
            continue;
        };
        if AggregateFunction::parse(&call.name.value) != Some(AggregateFunction::Avg) {
            continue;
        }

        let args = call
            .args_span()
            .ok_or_else(|| RewriteError::unsupported("select", "AVG without an argument"))?;
        let arg = format!(
            "{}{}",
            if call.distinct { "DISTINCT " } else { "" },
            tree.text(args)
        );
        tracing::debug!(arg = %arg, "expanding AVG");
        edits.insert(span.end, format!(",SUM({arg}),COUNT({arg})"));
    }
    Ok(())
}

/// Drops any LIMIT clause and appends `LIMIT n OFFSET m` to the statement.
pub(crate) fn override_limit(
    tree: &SqlTree,
    select: &SelectStmt,
    limit: LimitOverride,
    edits: &mut EditList,
) {
    if let Some(existing) = &select.limit {
        let before = tree.text(Span::new(0, existing.span.start));
        let start = before.trim_end().len();
        edits.delete(Span::new(start, existing.span.end));
    }
    edits.insert(
        select.span.end,
        format!(" LIMIT {} OFFSET {}", limit.limit, limit.offset),
    );
}
