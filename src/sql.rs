//! SQL parsing module.
//!
//! This module provides a handwritten recursive descent parser that converts a
//! MySQL statement into a span-carrying Abstract Syntax Tree (AST), plus the
//! [`EditList`] used to produce rewritten text from that tree.

mod ast;
mod edit;
mod error;
mod expr;
mod lexer;
mod parser;
mod token;
mod tree;

pub use ast::*;
pub use edit::{Edit, EditConflict, EditList};
pub use error::{Span, SyntaxError};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Keyword, Token, TokenKind};
pub use tree::{Node, NodeKind, SqlTree};
