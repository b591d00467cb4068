//! SQL lexer/tokenizer.
//!
//! The [`Lexer`] converts a MySQL statement into a stream of [`Token`]s.
//! Comments are not emitted as tokens but recorded on the side, because proxy
//! hints live inside them.

use super::ast::{Comment, CommentStyle};
use super::error::Span;
use super::token::{Keyword, Token, TokenKind};

/// SQL lexer that tokenizes input strings.
///
/// The lexer implements `Iterator<Item = Token>`. It handles:
/// - Keywords (case-insensitive)
/// - Identifiers (bare and backtick-quoted)
/// - Numeric literals (integers and floats)
/// - String literals (single- or double-quoted)
/// - The `?` placeholder
/// - Operators and punctuation
/// - Comments (`-- `, `#` and `/* */`), collected into [`Lexer::comments`]
///
/// Lexical errors are returned as `TokenKind::Error` tokens rather than
/// being accumulated separately.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    comments: Vec<Comment>,
    /// Whether EOF has been returned.
    eof_returned: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            comments: Vec::new(),
            eof_returned: false,
        }
    }

    /// Comments seen so far, in source order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Consumes the lexer, returning the collected comments.
    pub fn into_comments(self) -> Vec<Comment> {
        self.comments
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.pos..].starts_with(prefix)
    }

    /// Returns the character at `pos + offset` without consuming it.
    fn peek(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    /// Advances the position by `n` characters.
    fn advance(&mut self, n: usize) {
        for _ in 0..n {
            if let Some(ch) = self.peek(0) {
                self.pos += ch.len_utf8();
            }
        }
    }

    /// Skips whitespace and comments.
    ///
    /// Returns `Some(Token)` if an error was encountered (e.g., unterminated block comment),
    /// `None` otherwise.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();
            match self.skip_comment() {
                Ok(true) => continue,
                Ok(false) => return None,
                Err(token) => return Some(token),
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek(0).is_some_and(|ch| ch.is_whitespace()) {
            self.advance(1);
        }
    }

    /// Attempts to skip a comment, recording it.
    ///
    /// Returns `Ok(true)` if a comment was skipped, `Ok(false)` if no comment was present,
    /// or `Err(Token)` if an error occurred (e.g., unterminated block comment).
    fn skip_comment(&mut self) -> Result<bool, Token> {
        let start = self.pos;

        // `--` only opens a comment when followed by whitespace, so `a--1` stays arithmetic.
        let dash_comment = self.starts_with("--")
            && self.peek(2).is_none_or(|ch| ch.is_whitespace());
        if dash_comment || self.starts_with("#") {
            while let Some(ch) = self.peek(0) {
                if ch == '\n' {
                    break;
                }
                self.advance(1);
            }
            self.record_comment(start, CommentStyle::Line);
            return Ok(true);
        }

        // Block comments do not nest in MySQL.
        if self.starts_with("/*") {
            self.advance(2);
            while !self.is_eof() && !self.starts_with("*/") {
                self.advance(1);
            }
            if self.is_eof() {
                return Err(Token::new(
                    TokenKind::Error("unterminated block comment".to_string()),
                    Span::new(start, self.pos),
                ));
            }
            self.advance(2);
            self.record_comment(start, CommentStyle::Block);
            return Ok(true);
        }

        Ok(false)
    }

    fn record_comment(&mut self, start: usize, style: CommentStyle) {
        let span = Span::new(start, self.pos);
        self.comments.push(Comment {
            text: span.text(self.input).to_string(),
            style,
            span,
        });
    }

    /// Scans the next token from the input.
    fn scan_token(&mut self) -> Token {
        if let Some(error_token) = self.skip_whitespace_and_comments() {
            return error_token;
        }

        let start = self.pos;

        let Some(ch) = self.peek(0) else {
            return Token::new(TokenKind::Eof, Span::at(start));
        };

        match ch {
            '\'' | '"' => self.scan_string_literal(ch),
            '`' => self.scan_quoted_identifier(),
            '?' => {
                self.advance(1);
                Token::new(TokenKind::Placeholder, Span::new(start, self.pos))
            }
            _ if ch.is_ascii_digit()
                || (ch == '.' && self.peek(1).is_some_and(|c| c.is_ascii_digit())) =>
            {
                self.scan_number()
            }
            _ if is_ident_start(ch) => self.scan_identifier_or_keyword(),
            _ => self.scan_operator_or_punctuation(),
        }
    }

    /// Scans a string literal delimited by `quote`.
    ///
    /// The token keeps the raw text between the quotes. Backslash escapes and
    /// doubled quotes are skipped over so they do not terminate the literal.
    fn scan_string_literal(&mut self, quote: char) -> Token {
        let start = self.pos;
        self.advance(1);
        let body_start = self.pos;

        loop {
            match self.peek(0) {
                None => {
                    return Token::new(
                        TokenKind::Error("unterminated string literal".to_string()),
                        Span::new(start, self.pos),
                    );
                }
                Some('\\') => self.advance(2),
                Some(ch) if ch == quote => {
                    if self.peek(1) == Some(quote) {
                        self.advance(2);
                    } else {
                        break;
                    }
                }
                Some(_) => self.advance(1),
            }
        }

        let body = self.input[body_start..self.pos].to_string();
        self.advance(1); // closing quote
        Token::new(TokenKind::String(body), Span::new(start, self.pos))
    }

    fn scan_quoted_identifier(&mut self) -> Token {
        let start = self.pos;
        self.advance(1);

        let mut value = String::new();
        loop {
            match self.peek(0) {
                None => {
                    return Token::new(
                        TokenKind::Error("unterminated quoted identifier".to_string()),
                        Span::new(start, self.pos),
                    );
                }
                Some('`') => {
                    self.advance(1);
                    // `` is an escaped backtick
                    if self.peek(0) == Some('`') {
                        value.push('`');
                        self.advance(1);
                    } else {
                        break;
                    }
                }
                Some(ch) => {
                    value.push(ch);
                    self.advance(1);
                }
            }
        }

        Token::new(
            TokenKind::QuotedIdentifier(value),
            Span::new(start, self.pos),
        )
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;

        self.skip_digits();

        let mut is_float = false;
        if self.peek(0) == Some('.') {
            is_float = true;
            self.advance(1);
            self.skip_digits();
        }

        let mut invalid_exponent = false;
        if let Some('e' | 'E') = self.peek(0) {
            is_float = true;
            self.advance(1);
            if let Some('+' | '-') = self.peek(0) {
                self.advance(1);
            }
            let exp_start = self.pos;
            self.skip_digits();
            invalid_exponent = self.pos == exp_start;
        }

        let num_str = &self.input[start..self.pos];
        let span = Span::new(start, self.pos);

        if invalid_exponent {
            return Token::new(TokenKind::Error("invalid number literal".to_string()), span);
        }

        if is_float {
            match num_str.parse::<f64>() {
                Ok(n) if n.is_finite() => Token::new(TokenKind::Float(n), span),
                Ok(_) => Token::new(
                    TokenKind::Error("float literal out of range".to_string()),
                    span,
                ),
                Err(_) => Token::new(TokenKind::Error("invalid number literal".to_string()), span),
            }
        } else {
            match num_str.parse::<i64>() {
                Ok(n) => Token::new(TokenKind::Integer(n), span),
                Err(_) if num_str.parse::<u64>().ok() == Some(i64::MIN.unsigned_abs()) => {
                    Token::new(TokenKind::MinIntegerMagnitude, span)
                }
                Err(_) => Token::new(
                    TokenKind::Error("integer literal out of range".to_string()),
                    span,
                ),
            }
        }
    }

    fn skip_digits(&mut self) {
        while self.peek(0).is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance(1);
        }
    }

    fn scan_identifier_or_keyword(&mut self) -> Token {
        let start = self.pos;

        while self.peek(0).is_some_and(is_ident_continue) {
            self.advance(1);
        }

        let ident = &self.input[start..self.pos];
        let span = Span::new(start, self.pos);

        match Keyword::parse(ident) {
            Some(kw) => Token::new(TokenKind::Keyword(kw), span),
            None => Token::new(TokenKind::Identifier(ident.to_string()), span),
        }
    }

    fn scan_operator_or_punctuation(&mut self) -> Token {
        let start = self.pos;

        if let Some(two_chars) = self.input.get(self.pos..self.pos + 2) {
            let kind = match two_chars {
                "<>" | "!=" => Some(TokenKind::Neq),
                "<=" => Some(TokenKind::LtEq),
                ">=" => Some(TokenKind::GtEq),
                "&&" => Some(TokenKind::DoubleAmpersand),
                "||" => Some(TokenKind::DoublePipe),
                _ => None,
            };
            if let Some(kind) = kind {
                self.pos += 2;
                return Token::new(kind, Span::new(start, self.pos));
            }
        }

        let Some(ch) = self.peek(0) else {
            return Token::new(TokenKind::Eof, Span::at(start));
        };
        self.advance(1);
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => TokenKind::Eq,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            _ => TokenKind::Error(format!("unexpected character '{ch}'")),
        };

        Token::new(kind, Span::new(start, self.pos))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof_returned {
            return None;
        }

        let token = self.scan_token();
        if token.is_eof() {
            self.eof_returned = true;
        }
        Some(token)
    }
}

/// Returns true if the character can start an identifier.
fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

/// Returns true if the character can continue an identifier.
fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Identifier(s.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(lex(""), vec![TokenKind::Eof]);
        assert_eq!(lex("  \n\t  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            lex("select SELECT SeLeCt"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_backtick_identifiers() {
        assert_eq!(
            lex("`id` `my table` `a``b`"),
            vec![
                TokenKind::QuotedIdentifier("id".to_string()),
                TokenKind::QuotedIdentifier("my table".to_string()),
                TokenKind::QuotedIdentifier("a`b".to_string()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            lex("`open"),
            vec![
                TokenKind::Error("unterminated quoted identifier".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_literals_keep_raw_body() {
        assert_eq!(
            lex(r#"'hello' "world" 'it''s' 'a\'b' ''"#),
            vec![
                TokenKind::String("hello".to_string()),
                TokenKind::String("world".to_string()),
                TokenKind::String("it''s".to_string()),
                TokenKind::String(r"a\'b".to_string()),
                TokenKind::String(String::new()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            lex("0 42 3.5 .5 1e10 2.5e-3"),
            vec![
                TokenKind::Integer(0),
                TokenKind::Integer(42),
                TokenKind::Float(3.5),
                TokenKind::Float(0.5),
                TokenKind::Float(1e10),
                TokenKind::Float(2.5e-3),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_integer_out_of_range() {
        assert_eq!(
            lex("9223372036854775807 9223372036854775808 9223372036854775809"),
            vec![
                TokenKind::Integer(i64::MAX),
                TokenKind::MinIntegerMagnitude,
                TokenKind::Error("integer literal out of range".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_float_out_of_range() {
        assert_eq!(
            lex("1e999 1.0 1e308"),
            vec![
                TokenKind::Error("float literal out of range".to_string()),
                TokenKind::Float(1.0),
                TokenKind::Float(1e308),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(
            lex("a = ?"),
            vec![
                ident("a"),
                TokenKind::Eq,
                TokenKind::Placeholder,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            lex("+ - * / % = <> != < <= > >= && ||"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Asterisk,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eq,
                TokenKind::Neq,
                TokenKind::Neq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::DoubleAmpersand,
                TokenKind::DoublePipe,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_recorded() {
        let mut lexer = Lexer::new("SELECT /* @proxy a=1 */ x -- tail\nFROM t # end");
        let kinds: Vec<_> = lexer.by_ref().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Select),
                ident("x"),
                TokenKind::Keyword(Keyword::From),
                ident("t"),
                TokenKind::Eof,
            ]
        );

        let comments = lexer.into_comments();
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[0].text, "/* @proxy a=1 */");
        assert_eq!(comments[0].style, CommentStyle::Block);
        assert_eq!(comments[0].span, Span::new(7, 23));
        assert_eq!(comments[1].text, "-- tail");
        assert_eq!(comments[2].text, "# end");
    }

    #[test]
    fn test_double_dash_without_space_is_arithmetic() {
        assert_eq!(
            lex("a--1"),
            vec![
                ident("a"),
                TokenKind::Minus,
                TokenKind::Minus,
                TokenKind::Integer(1),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_block_comments_do_not_nest() {
        assert_eq!(
            lex("/* outer /* inner */ x"),
            vec![ident("x"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(
            lex("SELECT /* unterminated"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Error("unterminated block comment".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            lex("SELECT @ FROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Error("unexpected character '@'".to_string()),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_token_spans() {
        let tokens: Vec<_> = Lexer::new("SELECT `foo`").collect();

        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(7, 12));
        assert_eq!(tokens[2].span, Span::at(12));
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let mut lexer = Lexer::new("SELECT");
        assert!(lexer.next().is_some());
        assert!(lexer.next().is_some());
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }
}
