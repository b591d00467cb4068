//! Span-based text edits.
//!
//! Rewrites never mutate a parsed tree. They collect `(span, replacement)` pairs
//! and splice them into a copy of the source in one pass.

use thiserror::Error;

use super::error::Span;

/// A single replacement of `span` with `text`. An empty span is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub span: Span,
    pub text: String,
}

/// Two edits of one [`EditList`] cover the same text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("edit at position {start} overlaps text already replaced up to position {cursor}")]
pub struct EditConflict {
    /// Start of the rejected edit.
    pub start: usize,
    /// End of the text consumed by the edits before it.
    pub cursor: usize,
}

/// An ordered collection of non-overlapping edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditList {
    edits: Vec<Edit>,
}

impl EditList {
    /// Creates an empty edit list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the text covered by `span`.
    pub fn replace(&mut self, span: Span, text: impl Into<String>) {
        self.edits.push(Edit {
            span,
            text: text.into(),
        });
    }

    /// Inserts `text` at byte offset `pos`.
    ///
    /// Insertions at the same offset are emitted in the order they were added.
    pub fn insert(&mut self, pos: usize, text: impl Into<String>) {
        self.replace(Span::at(pos), text);
    }

    /// Removes the text covered by `span`.
    pub fn delete(&mut self, span: Span) {
        self.replace(span, String::new());
    }

    /// Number of recorded edits.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns `true` if no edit was recorded.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edit> {
        self.edits.iter()
    }

    /// Applies all edits to `source` and returns the new text.
    ///
    /// Edits must not overlap. An edit that starts inside text already
    /// replaced by an earlier edit fails the whole splice.
    pub fn apply(&self, source: &str) -> Result<String, EditConflict> {
        let mut edits: Vec<&Edit> = self.edits.iter().collect();
        // Stable: same-offset insertions keep their insertion order.
        edits.sort_by_key(|e| (e.span.start, e.span.end));

        let mut out = String::with_capacity(source.len());
        let mut cursor = 0;
        for edit in edits {
            if edit.span.start < cursor {
                return Err(EditConflict {
                    start: edit.span.start,
                    cursor,
                });
            }
            out.push_str(Span::new(cursor, edit.span.start).text(source));
            out.push_str(&edit.text);
            cursor = edit.span.end;
        }
        out.push_str(source.get(cursor..).unwrap_or(""));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_edit_list_is_identity() {
        assert_eq!(EditList::new().apply("SELECT 1").unwrap(), "SELECT 1");
    }

    #[test]
    fn test_replace_insert_delete() {
        let source = "SELECT a FROM t LIMIT 5";
        let mut edits = EditList::new();
        edits.delete(Span::new(15, 23));
        edits.replace(Span::new(14, 15), "`d`.`t`");
        edits.insert(8, ",b");
        assert_eq!(edits.len(), 3);
        assert_eq!(edits.apply(source).unwrap(), "SELECT a,b FROM `d`.`t`");
    }

    #[test]
    fn test_insertions_at_same_offset_keep_order() {
        let mut edits = EditList::new();
        edits.insert(1, "x");
        edits.insert(1, "y");
        assert_eq!(edits.apply("ab").unwrap(), "axyb");
    }

    #[test]
    fn test_insert_after_replaced_span() {
        let mut edits = EditList::new();
        edits.insert(3, "!");
        edits.replace(Span::new(0, 3), "xyz");
        assert_eq!(edits.apply("abc").unwrap(), "xyz!");
    }

    #[test]
    fn test_overlapping_edits_are_rejected() {
        let mut edits = EditList::new();
        edits.replace(Span::new(0, 4), "x");
        edits.insert(2, "y");
        let err = edits.apply("abcdef").unwrap_err();
        assert_eq!(err, EditConflict { start: 2, cursor: 4 });
        assert_eq!(
            err.to_string(),
            "edit at position 2 overlaps text already replaced up to position 4"
        );

        let mut edits = EditList::new();
        edits.replace(Span::new(1, 3), "x");
        edits.delete(Span::new(2, 5));
        assert_eq!(
            edits.apply("abcdef"),
            Err(EditConflict { start: 2, cursor: 3 })
        );
    }
}
