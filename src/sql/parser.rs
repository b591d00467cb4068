//! SQL parser using recursive descent.
//!
//! The [`Parser`] converts a stream of tokens into an Abstract Syntax Tree (AST).
//! It uses recursive descent for statements and precedence climbing for
//! expression parsing (see `expr.rs`).

use super::ast::*;
use super::error::{Span, SyntaxError};
use super::lexer::Lexer;
use super::token::{Keyword, Token, TokenKind};

/// SQL parser that converts tokens into an AST.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    pos: usize,
    input: &'a str,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given SQL input.
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let tokens: Vec<Token> = lexer.by_ref().collect();
        let comments = lexer.into_comments();

        Self {
            tokens,
            comments,
            pos: 0,
            input,
        }
    }

    /// Comments found in the input, in source order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Consumes the parser, returning the comments found in the input.
    pub fn into_comments(self) -> Vec<Comment> {
        self.comments
    }

    /// Parses the input as exactly one statement with an optional trailing `;`.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if the input contains a lexical error, is empty,
    /// or is not a valid statement.
    pub fn parse(&mut self) -> Result<Statement, SyntaxError> {
        for token in &self.tokens {
            if let TokenKind::Error(message) = &token.kind {
                return Err(SyntaxError::new(message.clone(), token.span));
            }
        }

        if self.is_eof() {
            return Err(SyntaxError::new("empty statement", self.current_span()));
        }

        let stmt = self.parse_statement()?;

        self.consume_token(TokenKind::Semicolon);

        if !self.is_eof() {
            let span = self.current_span();
            return Err(SyntaxError::unexpected_token(
                "end of input",
                &self.current_token_name(),
                span,
            ));
        }

        Ok(stmt)
    }

    /// Parses a single statement.
    fn parse_statement(&mut self) -> Result<Statement, SyntaxError> {
        match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::Select)) => {
                let select = self.parse_select_stmt()?;
                Ok(Statement::Select(Box::new(select)))
            }
            Some(TokenKind::Keyword(Keyword::Insert)) => self.parse_insert_stmt(),
            Some(TokenKind::Keyword(Keyword::Update)) => self.parse_update_stmt(),
            Some(TokenKind::Keyword(Keyword::Delete)) => self.parse_delete_stmt(),
            Some(TokenKind::Keyword(Keyword::Begin)) => {
                let stmt = self.parse_transaction_stmt(|p| {
                    p.consume_keyword(Keyword::Work);
                    Ok(())
                })?;
                Ok(Statement::Begin(stmt))
            }
            Some(TokenKind::Keyword(Keyword::Start)) => {
                let stmt =
                    self.parse_transaction_stmt(|p| p.expect_keyword(Keyword::Transaction))?;
                Ok(Statement::Begin(stmt))
            }
            Some(TokenKind::Keyword(Keyword::Commit)) => {
                let stmt = self.parse_transaction_stmt(|p| {
                    p.consume_keyword(Keyword::Work);
                    Ok(())
                })?;
                Ok(Statement::Commit(stmt))
            }
            Some(TokenKind::Keyword(Keyword::Rollback)) => {
                let stmt = self.parse_transaction_stmt(|p| {
                    p.consume_keyword(Keyword::Work);
                    Ok(())
                })?;
                Ok(Statement::Rollback(stmt))
            }
            _ => self.parse_other_stmt(),
        }
    }

    /// Parses BEGIN, START TRANSACTION, COMMIT or ROLLBACK. `rest` consumes
    /// whatever follows the leading keyword.
    fn parse_transaction_stmt(
        &mut self,
        rest: impl FnOnce(&mut Self) -> Result<(), SyntaxError>,
    ) -> Result<TransactionStmt, SyntaxError> {
        let keyword = self.current_span();
        self.advance();
        let hint = self.hint_after(keyword);
        rest(self)?;

        Ok(TransactionStmt {
            hint,
            span: Span::new(keyword.start, self.prev_end()),
        })
    }

    /// Consumes an unmodeled statement up to `;` or end of input.
    fn parse_other_stmt(&mut self) -> Result<Statement, SyntaxError> {
        if self.check_token(TokenKind::Semicolon) {
            let span = self.current_span();
            return Err(SyntaxError::unexpected_token(
                "statement",
                &self.current_token_name(),
                span,
            ));
        }

        let start = self.current_span();
        let keyword = start.text(self.input).to_string();
        let mut placeholders = Vec::new();

        while !self.is_eof() && !self.check_token(TokenKind::Semicolon) {
            if self.check_token(TokenKind::Placeholder) {
                placeholders.push(Literal {
                    kind: LiteralKind::Placeholder,
                    span: self.current_span(),
                });
            }
            self.advance();
        }

        Ok(Statement::Other(OtherStmt {
            keyword,
            placeholders,
            span: Span::new(start.start, self.prev_end()),
        }))
    }

    /// Parses a SELECT statement.
    pub(crate) fn parse_select_stmt(&mut self) -> Result<SelectStmt, SyntaxError> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Select)?;
        let hint = self.hint_after(start);

        // DISTINCT / ALL
        let distinct = if self.consume_keyword(Keyword::Distinct) {
            true
        } else {
            self.consume_keyword(Keyword::All);
            false
        };

        let columns = self.parse_select_list()?;

        let from = if self.consume_keyword(Keyword::From) {
            self.parse_table_list()?
        } else {
            vec![]
        };

        let where_clause = self.parse_where_clause()?;

        let group_by = if self.consume_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            self.parse_expr_list()?
        } else {
            vec![]
        };

        let having = if self.consume_keyword(Keyword::Having) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let order_by = self.parse_order_by_clause()?;
        let limit = self.parse_limit_clause()?;

        Ok(SelectStmt {
            hint,
            distinct,
            columns,
            from,
            where_clause,
            group_by,
            having,
            order_by,
            limit,
            span: Span::new(start.start, self.prev_end()),
        })
    }

    /// Parses the select list (columns/expressions).
    fn parse_select_list(&mut self) -> Result<Vec<SelectItem>, SyntaxError> {
        let mut items = Vec::new();

        loop {
            items.push(self.parse_select_item()?);
            if !self.consume_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(items)
    }

    /// Parses a single select item.
    fn parse_select_item(&mut self) -> Result<SelectItem, SyntaxError> {
        let start = self.current_span();

        if self.consume_token(TokenKind::Asterisk) {
            return Ok(SelectItem::Wildcard { span: start });
        }

        if self.at_qualified_wildcard() {
            let qualifier = self.parse_object_name()?;
            self.expect_token(TokenKind::Dot)?;
            self.expect_token(TokenKind::Asterisk)?;
            return Ok(SelectItem::QualifiedWildcard {
                qualifier,
                span: Span::new(start.start, self.prev_end()),
            });
        }

        let expr = self.parse_expr()?;
        let alias = self.parse_optional_alias()?;

        Ok(SelectItem::Expr {
            expr,
            alias,
            span: Span::new(start.start, self.prev_end()),
        })
    }

    /// Looks ahead for `name(.name)*.*`.
    fn at_qualified_wildcard(&self) -> bool {
        let mut n = 0;
        loop {
            if !self.peek_nth_kind(n).is_some_and(is_ident_kind) {
                return false;
            }
            if self.peek_nth_kind(n + 1) != Some(&TokenKind::Dot) {
                return false;
            }
            if self.peek_nth_kind(n + 2) == Some(&TokenKind::Asterisk) {
                return true;
            }
            n += 2;
        }
    }

    /// Parses `AS alias` or a bare identifier alias.
    fn parse_optional_alias(&mut self) -> Result<Option<Ident>, SyntaxError> {
        if self.consume_keyword(Keyword::As) {
            return Ok(Some(self.expect_ident()?));
        }
        if matches!(
            self.peek_kind(),
            Some(TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_))
        ) {
            return Ok(Some(self.expect_ident()?));
        }
        Ok(None)
    }

    /// Parses a comma-separated list of table references.
    fn parse_table_list(&mut self) -> Result<Vec<TableRef>, SyntaxError> {
        let mut tables = vec![self.parse_table_ref()?];
        while self.consume_token(TokenKind::Comma) {
            tables.push(self.parse_table_ref()?);
        }
        Ok(tables)
    }

    /// Parses a table reference, including any joins.
    fn parse_table_ref(&mut self) -> Result<TableRef, SyntaxError> {
        let start = self.current_span();
        let mut table_ref = self.parse_primary_table_ref()?;

        loop {
            let join_type = if self.consume_keyword(Keyword::Cross) {
                self.expect_keyword(Keyword::Join)?;
                JoinType::Cross
            } else if self.consume_keyword(Keyword::Inner) {
                self.expect_keyword(Keyword::Join)?;
                JoinType::Inner
            } else if self.consume_keyword(Keyword::Left) {
                self.consume_keyword(Keyword::Outer);
                self.expect_keyword(Keyword::Join)?;
                JoinType::Left
            } else if self.consume_keyword(Keyword::Right) {
                self.consume_keyword(Keyword::Outer);
                self.expect_keyword(Keyword::Join)?;
                JoinType::Right
            } else if self.consume_keyword(Keyword::Join) {
                JoinType::Inner
            } else {
                break;
            };

            let right = self.parse_primary_table_ref()?;

            let condition = if self.consume_keyword(Keyword::On) {
                Some(JoinCondition::On(self.parse_expr()?))
            } else if self.consume_keyword(Keyword::Using) {
                self.expect_token(TokenKind::LParen)?;
                let columns = self.parse_ident_list()?;
                self.expect_token(TokenKind::RParen)?;
                Some(JoinCondition::Using(columns))
            } else {
                None
            };

            table_ref = TableRef::Join {
                left: Box::new(table_ref),
                join_type,
                right: Box::new(right),
                condition,
                span: Span::new(start.start, self.prev_end()),
            };
        }

        Ok(table_ref)
    }

    /// Parses a table name with optional alias.
    fn parse_primary_table_ref(&mut self) -> Result<TableRef, SyntaxError> {
        if self.check_token(TokenKind::LParen) {
            return Err(SyntaxError::new(
                "derived tables are not supported",
                self.current_span(),
            ));
        }

        let name = self.parse_object_name()?;
        let alias = self.parse_optional_alias()?;

        Ok(TableRef::Table {
            span: Span::new(name.span.start, self.prev_end()),
            name,
            alias,
        })
    }

    fn parse_where_clause(&mut self) -> Result<Option<Expr>, SyntaxError> {
        if self.consume_keyword(Keyword::Where) {
            Ok(Some(self.parse_expr()?))
        } else {
            Ok(None)
        }
    }

    /// Parses an optional ORDER BY clause.
    fn parse_order_by_clause(&mut self) -> Result<Vec<OrderByItem>, SyntaxError> {
        if !self.consume_keyword(Keyword::Order) {
            return Ok(vec![]);
        }
        self.expect_keyword(Keyword::By)?;

        let mut items = Vec::new();
        loop {
            let expr = self.parse_expr()?;

            let direction = if self.consume_keyword(Keyword::Asc) {
                SortDirection::Asc
            } else if self.consume_keyword(Keyword::Desc) {
                SortDirection::Desc
            } else {
                SortDirection::default()
            };

            items.push(OrderByItem {
                span: Span::new(expr.span().start, self.prev_end()),
                expr,
                direction,
            });

            if !self.consume_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(items)
    }

    /// Parses an optional LIMIT clause in any of its three spellings.
    fn parse_limit_clause(&mut self) -> Result<Option<LimitClause>, SyntaxError> {
        let start = self.current_span();
        if !self.consume_keyword(Keyword::Limit) {
            return Ok(None);
        }

        let first = self.parse_limit_operand()?;
        let (limit, offset) = if self.consume_token(TokenKind::Comma) {
            // LIMIT offset, count
            (self.parse_limit_operand()?, Some(first))
        } else if self.consume_keyword(Keyword::Offset) {
            (first, Some(self.parse_limit_operand()?))
        } else {
            (first, None)
        };

        Ok(Some(LimitClause {
            limit,
            offset,
            span: Span::new(start.start, self.prev_end()),
        }))
    }

    fn parse_limit_operand(&mut self) -> Result<Literal, SyntaxError> {
        let span = self.current_span();
        let kind = match self.peek_kind() {
            Some(TokenKind::Integer(n)) => LiteralKind::Integer(*n),
            Some(TokenKind::Placeholder) => LiteralKind::Placeholder,
            _ => {
                return Err(SyntaxError::unexpected_token(
                    "integer or '?'",
                    &self.current_token_name(),
                    span,
                ));
            }
        };
        self.advance();
        Ok(Literal { kind, span })
    }

    /// Parses an INSERT statement.
    fn parse_insert_stmt(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Insert)?;
        let hint = self.hint_after(start);

        let ignore = self.consume_keyword(Keyword::Ignore);
        self.consume_keyword(Keyword::Into);
        let table = self.parse_object_name()?;

        let columns = if self.consume_token(TokenKind::LParen) {
            let cols = if self.check_token(TokenKind::RParen) {
                vec![]
            } else {
                self.parse_ident_list()?
            };
            self.expect_token(TokenKind::RParen)?;
            cols
        } else {
            vec![]
        };

        let source = if self.consume_keyword(Keyword::Values) || self.consume_keyword(Keyword::Value)
        {
            let mut rows = vec![self.parse_value_row()?];
            while self.consume_token(TokenKind::Comma) {
                rows.push(self.parse_value_row()?);
            }
            InsertSource::Values(rows)
        } else if self.consume_keyword(Keyword::Set) {
            InsertSource::Set(self.parse_assignments()?)
        } else if self.check_keyword(Keyword::Select) {
            InsertSource::Select(Box::new(self.parse_select_stmt()?))
        } else {
            let span = self.current_span();
            return Err(SyntaxError::unexpected_token(
                "VALUES, SET or SELECT",
                &self.current_token_name(),
                span,
            ));
        };

        let on_duplicate = if self.consume_keyword(Keyword::On) {
            self.expect_keyword(Keyword::Duplicate)?;
            self.expect_keyword(Keyword::Key)?;
            self.expect_keyword(Keyword::Update)?;
            self.parse_assignments()?
        } else {
            vec![]
        };

        Ok(Statement::Insert(Box::new(InsertStmt {
            hint,
            ignore,
            table,
            columns,
            source,
            on_duplicate,
            span: Span::new(start.start, self.prev_end()),
        })))
    }

    /// Parses one parenthesized VALUES tuple.
    fn parse_value_row(&mut self) -> Result<ValueRow, SyntaxError> {
        let open = self.current_span();
        self.expect_token(TokenKind::LParen)?;

        let values = if self.check_token(TokenKind::RParen) {
            vec![]
        } else {
            self.parse_expr_list()?
        };

        let close = self.current_span();
        self.expect_token(TokenKind::RParen)?;

        Ok(ValueRow {
            values,
            span: Span::new(open.start, close.end),
            inner: Span::new(open.end, close.start),
        })
    }

    /// Parses a comma-separated list of `column = expr` assignments.
    fn parse_assignments(&mut self) -> Result<Vec<Assignment>, SyntaxError> {
        let mut assignments = Vec::new();
        loop {
            let column = self.parse_object_name()?;
            self.expect_token(TokenKind::Eq)?;
            let value = self.parse_expr()?;
            assignments.push(Assignment {
                span: Span::new(column.span.start, self.prev_end()),
                column,
                value,
            });

            if !self.consume_token(TokenKind::Comma) {
                break;
            }
        }
        Ok(assignments)
    }

    /// Parses an UPDATE statement.
    fn parse_update_stmt(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Update)?;
        let hint = self.hint_after(start);
        self.consume_keyword(Keyword::Ignore);

        let tables = self.parse_table_list()?;
        self.expect_keyword(Keyword::Set)?;
        let assignments = self.parse_assignments()?;
        let where_clause = self.parse_where_clause()?;
        let order_by = self.parse_order_by_clause()?;
        let limit = self.parse_limit_clause()?;

        Ok(Statement::Update(Box::new(UpdateStmt {
            hint,
            tables,
            assignments,
            where_clause,
            order_by,
            limit,
            span: Span::new(start.start, self.prev_end()),
        })))
    }

    /// Parses a DELETE statement in its single- or multi-table forms.
    fn parse_delete_stmt(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current_span();
        self.expect_keyword(Keyword::Delete)?;
        let hint = self.hint_after(start);
        self.consume_keyword(Keyword::Ignore);

        let (targets, from) = if self.consume_keyword(Keyword::From) {
            let tables = self.parse_table_list()?;
            if self.consume_keyword(Keyword::Using) {
                let mut targets = Vec::with_capacity(tables.len());
                for table in tables {
                    match table {
                        TableRef::Table { name, .. } => targets.push(name),
                        TableRef::Join { span, .. } => {
                            return Err(SyntaxError::new(
                                "expected table name before USING",
                                span,
                            ));
                        }
                    }
                }
                (targets, self.parse_table_list()?)
            } else {
                (vec![], tables)
            }
        } else {
            let mut targets = vec![self.parse_delete_target()?];
            while self.consume_token(TokenKind::Comma) {
                targets.push(self.parse_delete_target()?);
            }
            self.expect_keyword(Keyword::From)?;
            (targets, self.parse_table_list()?)
        };

        let where_clause = self.parse_where_clause()?;
        let order_by = self.parse_order_by_clause()?;
        let limit = self.parse_limit_clause()?;

        Ok(Statement::Delete(Box::new(DeleteStmt {
            hint,
            targets,
            from,
            where_clause,
            order_by,
            limit,
            span: Span::new(start.start, self.prev_end()),
        })))
    }

    /// Parses `t` or `t.*` in a multi-table DELETE target list.
    fn parse_delete_target(&mut self) -> Result<ObjectName, SyntaxError> {
        let name = self.parse_object_name()?;
        if self.check_token(TokenKind::Dot)
            && self.peek_nth_kind(1) == Some(&TokenKind::Asterisk)
        {
            self.advance();
            self.advance();
        }
        Ok(name)
    }

    /// Parses a dotted name such as `t`, `db.t` or `` `db`.`t` ``.
    pub(crate) fn parse_object_name(&mut self) -> Result<ObjectName, SyntaxError> {
        let mut parts = vec![self.expect_ident()?];
        while self.check_token(TokenKind::Dot) && self.peek_nth_kind(1).is_some_and(is_ident_kind)
        {
            self.advance();
            parts.push(self.expect_ident()?);
        }

        let span = parts[0].span.extend(parts[parts.len() - 1].span);
        Ok(ObjectName { parts, span })
    }

    /// Returns the proxy hint comment sitting between `keyword` and the current token.
    fn hint_after(&self, keyword: Span) -> Option<Comment> {
        let next = self.current_span().start;
        self.comments
            .iter()
            .find(|c| {
                c.style == CommentStyle::Block
                    && c.span.start >= keyword.end
                    && c.span.end <= next
                    && is_proxy_hint(&c.text)
            })
            .cloned()
    }

    // ==================== Helper methods ====================

    /// Returns true if at end of tokens.
    pub(crate) fn is_eof(&self) -> bool {
        self.peek().is_none_or(|t| t.is_eof())
    }

    /// Peeks at the current token.
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Peeks at the kind of the current token.
    pub(crate) fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    /// Peeks at the nth token ahead.
    pub(crate) fn peek_nth_kind(&self, n: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + n).map(|t| &t.kind)
    }

    /// Advances to the next token.
    pub(crate) fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Returns the span of the current token.
    pub(crate) fn current_span(&self) -> Span {
        self.peek().map_or(Span::at(self.input.len()), |t| t.span)
    }

    /// Returns the end offset of the last consumed token.
    pub(crate) fn prev_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |t| t.span.end)
    }

    /// Returns a display name for the current token.
    pub(crate) fn current_token_name(&self) -> String {
        self.peek()
            .map_or("end of input".to_string(), |t| t.kind.display_name())
    }

    /// Checks if the current token is a specific keyword.
    pub(crate) fn check_keyword(&self, kw: Keyword) -> bool {
        matches!(self.peek_kind(), Some(TokenKind::Keyword(k)) if *k == kw)
    }

    /// Consumes the current token if it's a specific keyword.
    pub(crate) fn consume_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a specific keyword, returning an error if not found.
    pub(crate) fn expect_keyword(&mut self, kw: Keyword) -> Result<(), SyntaxError> {
        if self.consume_keyword(kw) {
            Ok(())
        } else {
            let span = self.current_span();
            Err(SyntaxError::unexpected_token(
                &format!("keyword '{}'", kw.as_str()),
                &self.current_token_name(),
                span,
            ))
        }
    }

    /// Checks if the current token matches.
    pub(crate) fn check_token(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(&kind)
    }

    /// Consumes the current token if it matches.
    pub(crate) fn consume_token(&mut self, kind: TokenKind) -> bool {
        if self.check_token(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a specific token, returning an error if not found.
    pub(crate) fn expect_token(&mut self, kind: TokenKind) -> Result<(), SyntaxError> {
        if self.consume_token(kind.clone()) {
            Ok(())
        } else {
            let span = self.current_span();
            Err(SyntaxError::unexpected_token(
                &kind.display_name(),
                &self.current_token_name(),
                span,
            ))
        }
    }

    /// Expects an identifier. Non-reserved keywords are accepted as written.
    pub(crate) fn expect_ident(&mut self) -> Result<Ident, SyntaxError> {
        let span = self.current_span();
        let (value, quoted) = match self.peek_kind() {
            Some(TokenKind::Identifier(name)) => (name.clone(), false),
            Some(TokenKind::QuotedIdentifier(name)) => (name.clone(), true),
            Some(TokenKind::Keyword(kw)) if !kw.is_reserved() => {
                (span.text(self.input).to_string(), false)
            }
            _ => {
                return Err(SyntaxError::unexpected_token(
                    "identifier",
                    &self.current_token_name(),
                    span,
                ));
            }
        };
        self.advance();
        Ok(Ident {
            value,
            quoted,
            span,
        })
    }

    /// Parses a comma-separated list of identifiers.
    fn parse_ident_list(&mut self) -> Result<Vec<Ident>, SyntaxError> {
        let mut list = vec![self.expect_ident()?];
        while self.consume_token(TokenKind::Comma) {
            list.push(self.expect_ident()?);
        }
        Ok(list)
    }

    /// Parses a comma-separated list of expressions.
    pub(crate) fn parse_expr_list(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        let mut list = vec![self.parse_expr()?];
        while self.consume_token(TokenKind::Comma) {
            list.push(self.parse_expr()?);
        }
        Ok(list)
    }
}

/// Returns true for tokens usable as an identifier.
pub(crate) fn is_ident_kind(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => true,
        TokenKind::Keyword(kw) => !kw.is_reserved(),
        _ => false,
    }
}

/// Returns true if a block comment carries a `@proxy` directive.
pub(crate) fn is_proxy_hint(text: &str) -> bool {
    text.strip_prefix("/*")
        .is_some_and(|body| body.trim_start().starts_with("@proxy"))
}
