//! SQL syntax error types.
//!
//! This module provides [`Span`], the byte range every token and tree node carries,
//! and the [`SyntaxError`] type reported by the lexer and parser.

use thiserror::Error;

/// A span in the source SQL string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// Byte offset from the start of the input.
    pub start: usize,
    /// Byte offset of the end of the span (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a zero-length span at the given position.
    pub fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Extends this span to include another span.
    pub fn extend(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for zero-width spans, such as insertion points.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the slice of `source` covered by this span.
    ///
    /// Out-of-range spans yield an empty string rather than panicking.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

/// SQL syntax error with source position information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at position {}", .span.start + 1)]
pub struct SyntaxError {
    /// Error message.
    pub message: String,
    /// Position in the source where the error occurred.
    pub span: Span,
}

impl SyntaxError {
    /// Creates a new syntax error at the given position.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Creates a new error for an unexpected token.
    pub fn unexpected_token(expected: &str, found: &str, span: Span) -> Self {
        Self::new(format!("expected {expected}, found {found}"), span)
    }

    /// Returns the 1-based character position for error reporting.
    pub fn position(&self) -> usize {
        self.span.start + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_at() {
        let span = Span::at(5);
        assert_eq!(span.start, 5);
        assert!(span.is_empty());
    }

    #[test]
    fn test_span_extend() {
        let extended = Span::new(5, 10).extend(Span::new(15, 20));
        assert_eq!(extended, Span::new(5, 20));
        assert_eq!(extended.len(), 15);
    }

    #[test]
    fn test_span_text() {
        let sql = "SELECT a FROM t";
        assert_eq!(Span::new(7, 8).text(sql), "a");
        assert_eq!(Span::new(14, 40).text(sql), "");
    }

    #[test]
    fn test_syntax_error_display() {
        let err = SyntaxError::new("unexpected token", Span::at(5));
        assert_eq!(err.position(), 6);
        assert_eq!(err.to_string(), "unexpected token at position 6");
    }
}
