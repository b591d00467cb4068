//! SQL token types.
//!
//! This module defines the [`Token`] type produced by the lexer, covering the
//! MySQL keywords, operators, literals, and identifiers the parser understands.

use super::error::Span;

/// A SQL token with its span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// The span of this token in the source.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an end-of-file token.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// The kind of a SQL token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42).
    Integer(i64),
    /// Floating-point literal (e.g., 3.14, 1e10, .5).
    Float(f64),
    /// `9223372036854775808`, which only fits in an `i64` after a unary minus.
    MinIntegerMagnitude,
    /// String literal, single- or double-quoted. Holds the raw text between the
    /// outer quotes; escape sequences are not interpreted.
    String(String),

    // Identifiers and keywords
    /// Unquoted identifier (e.g., foo, my_table).
    Identifier(String),
    /// Backtick-quoted identifier with the backticks removed.
    QuotedIdentifier(String),
    /// Prepared statement placeholder `?`.
    Placeholder,

    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Asterisk,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// <> or !=
    Neq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// && (logical AND)
    DoubleAmpersand,
    /// || (logical OR)
    DoublePipe,

    // Punctuation
    /// (
    LParen,
    /// )
    RParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,

    /// Lexical error with a description.
    Error(String),

    /// End of file/input.
    Eof,
}

impl TokenKind {
    /// Returns the display name for error messages.
    pub fn display_name(&self) -> String {
        match self {
            TokenKind::Integer(n) => format!("integer '{n}'"),
            TokenKind::Float(n) => format!("float '{n:?}'"),
            TokenKind::MinIntegerMagnitude => format!("integer '{}'", i64::MIN.unsigned_abs()),
            TokenKind::String(s) => format!("string '{s}'"),
            TokenKind::Identifier(s) => format!("identifier '{s}'"),
            TokenKind::QuotedIdentifier(s) => format!("identifier '`{s}`'"),
            TokenKind::Placeholder => "placeholder '?'".to_string(),
            TokenKind::Keyword(kw) => format!("keyword '{}'", kw.as_str()),
            TokenKind::Plus => "'+'".to_string(),
            TokenKind::Minus => "'-'".to_string(),
            TokenKind::Asterisk => "'*'".to_string(),
            TokenKind::Slash => "'/'".to_string(),
            TokenKind::Percent => "'%'".to_string(),
            TokenKind::Eq => "'='".to_string(),
            TokenKind::Neq => "'<>'".to_string(),
            TokenKind::Lt => "'<'".to_string(),
            TokenKind::LtEq => "'<='".to_string(),
            TokenKind::Gt => "'>'".to_string(),
            TokenKind::GtEq => "'>='".to_string(),
            TokenKind::DoubleAmpersand => "'&&'".to_string(),
            TokenKind::DoublePipe => "'||'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::Error(msg) => format!("invalid token ({msg})"),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// SQL keywords.
///
/// Keywords are case-insensitive. Non-reserved keywords (see
/// [`Keyword::is_reserved`]) may also be used as identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // DML
    Select,
    Insert,
    Update,
    Delete,
    Into,
    Values,
    Value,
    Set,
    From,
    Where,
    Ignore,
    Duplicate,
    Key,

    // SELECT clauses
    As,
    Distinct,
    All,
    Group,
    Having,
    Order,
    By,
    Asc,
    Desc,
    Limit,
    Offset,

    // JOIN
    Join,
    Inner,
    Left,
    Right,
    Outer,
    Cross,
    On,
    Using,

    // Logical / Comparison
    And,
    Or,
    Not,
    Is,
    Null,
    True,
    False,
    In,
    Between,
    Like,
    Escape,

    // Transactions
    Begin,
    Start,
    Transaction,
    Work,
    Commit,
    Rollback,
}

impl Keyword {
    /// Returns the string representation of this keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::Insert => "INSERT",
            Keyword::Update => "UPDATE",
            Keyword::Delete => "DELETE",
            Keyword::Into => "INTO",
            Keyword::Values => "VALUES",
            Keyword::Value => "VALUE",
            Keyword::Set => "SET",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::Ignore => "IGNORE",
            Keyword::Duplicate => "DUPLICATE",
            Keyword::Key => "KEY",
            Keyword::As => "AS",
            Keyword::Distinct => "DISTINCT",
            Keyword::All => "ALL",
            Keyword::Group => "GROUP",
            Keyword::Having => "HAVING",
            Keyword::Order => "ORDER",
            Keyword::By => "BY",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
            Keyword::Limit => "LIMIT",
            Keyword::Offset => "OFFSET",
            Keyword::Join => "JOIN",
            Keyword::Inner => "INNER",
            Keyword::Left => "LEFT",
            Keyword::Right => "RIGHT",
            Keyword::Outer => "OUTER",
            Keyword::Cross => "CROSS",
            Keyword::On => "ON",
            Keyword::Using => "USING",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::Is => "IS",
            Keyword::Null => "NULL",
            Keyword::True => "TRUE",
            Keyword::False => "FALSE",
            Keyword::In => "IN",
            Keyword::Between => "BETWEEN",
            Keyword::Like => "LIKE",
            Keyword::Escape => "ESCAPE",
            Keyword::Begin => "BEGIN",
            Keyword::Start => "START",
            Keyword::Transaction => "TRANSACTION",
            Keyword::Work => "WORK",
            Keyword::Commit => "COMMIT",
            Keyword::Rollback => "ROLLBACK",
        }
    }

    /// Attempts to parse a keyword from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Keyword::Select),
            "INSERT" => Some(Keyword::Insert),
            "UPDATE" => Some(Keyword::Update),
            "DELETE" => Some(Keyword::Delete),
            "INTO" => Some(Keyword::Into),
            "VALUES" => Some(Keyword::Values),
            "VALUE" => Some(Keyword::Value),
            "SET" => Some(Keyword::Set),
            "FROM" => Some(Keyword::From),
            "WHERE" => Some(Keyword::Where),
            "IGNORE" => Some(Keyword::Ignore),
            "DUPLICATE" => Some(Keyword::Duplicate),
            "KEY" => Some(Keyword::Key),
            "AS" => Some(Keyword::As),
            "DISTINCT" => Some(Keyword::Distinct),
            "ALL" => Some(Keyword::All),
            "GROUP" => Some(Keyword::Group),
            "HAVING" => Some(Keyword::Having),
            "ORDER" => Some(Keyword::Order),
            "BY" => Some(Keyword::By),
            "ASC" => Some(Keyword::Asc),
            "DESC" => Some(Keyword::Desc),
            "LIMIT" => Some(Keyword::Limit),
            "OFFSET" => Some(Keyword::Offset),
            "JOIN" => Some(Keyword::Join),
            "INNER" => Some(Keyword::Inner),
            "LEFT" => Some(Keyword::Left),
            "RIGHT" => Some(Keyword::Right),
            "OUTER" => Some(Keyword::Outer),
            "CROSS" => Some(Keyword::Cross),
            "ON" => Some(Keyword::On),
            "USING" => Some(Keyword::Using),
            "AND" => Some(Keyword::And),
            "OR" => Some(Keyword::Or),
            "NOT" => Some(Keyword::Not),
            "IS" => Some(Keyword::Is),
            "NULL" => Some(Keyword::Null),
            "TRUE" => Some(Keyword::True),
            "FALSE" => Some(Keyword::False),
            "IN" => Some(Keyword::In),
            "BETWEEN" => Some(Keyword::Between),
            "LIKE" => Some(Keyword::Like),
            "ESCAPE" => Some(Keyword::Escape),
            "BEGIN" => Some(Keyword::Begin),
            "START" => Some(Keyword::Start),
            "TRANSACTION" => Some(Keyword::Transaction),
            "WORK" => Some(Keyword::Work),
            "COMMIT" => Some(Keyword::Commit),
            "ROLLBACK" => Some(Keyword::Rollback),
            _ => None,
        }
    }

    /// Returns true if MySQL reserves this word, so it cannot be used as a bare
    /// identifier.
    pub fn is_reserved(&self) -> bool {
        !matches!(
            self,
            Keyword::Value
                | Keyword::Offset
                | Keyword::Duplicate
                | Keyword::Escape
                | Keyword::Begin
                | Keyword::Start
                | Keyword::Transaction
                | Keyword::Work
                | Keyword::Commit
                | Keyword::Rollback
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::parse("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::parse("select"), Some(Keyword::Select));
        assert_eq!(Keyword::parse("SeLeCt"), Some(Keyword::Select));
        assert_eq!(Keyword::parse("unknown"), None);
    }

    #[test]
    fn test_keyword_roundtrip() {
        let keywords = [
            Keyword::Select,
            Keyword::Insert,
            Keyword::Value,
            Keyword::Duplicate,
            Keyword::Rollback,
        ];
        for kw in keywords {
            assert_eq!(Keyword::parse(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn test_reserved_keywords() {
        assert!(Keyword::Select.is_reserved());
        assert!(Keyword::Limit.is_reserved());
        assert!(!Keyword::Value.is_reserved());
        assert!(!Keyword::Offset.is_reserved());
    }

    #[test]
    fn test_token_display_name() {
        assert_eq!(
            TokenKind::Keyword(Keyword::Select).display_name(),
            "keyword 'SELECT'"
        );
        assert_eq!(
            TokenKind::QuotedIdentifier("id".to_string()).display_name(),
            "identifier '`id`'"
        );
        assert_eq!(TokenKind::Placeholder.display_name(), "placeholder '?'");
        assert_eq!(TokenKind::Eof.display_name(), "end of input");
    }
}
