//! Tokens produced by the scanner.

use crate::token_kind::TokenKind;
use lox_core::text::{text_pos, TextPos, TextSpan};
use std::fmt;

/// The literal payload carried by identifier, string and number tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// The identifier name, identical to the lexeme.
    Identifier(String),
    /// The string contents without the surrounding quotes.
    String(String),
    Number(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Identifier(name) => f.write_str(name),
            Literal::String(value) => f.write_str(value),
            Literal::Number(value) => write!(f, "{value}"),
        }
    }
}

/// A scanned token.
///
/// For every token except the end-of-input marker, `lexeme` is the exact
/// source text at `location`. The constructors do not check this; the
/// scanner is responsible for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    literal: Option<Literal>,
    location: TextPos,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: Option<Literal>,
        location: TextPos,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            location,
        }
    }

    /// A token with no lexeme and no literal, such as the end-of-input marker.
    pub fn bare(kind: TokenKind, location: TextPos) -> Self {
        Self {
            kind,
            lexeme: String::new(),
            literal: None,
            location,
        }
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    #[inline]
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    #[inline]
    pub fn literal(&self) -> Option<&Literal> {
        self.literal.as_ref()
    }

    /// Byte offset of the token's first character.
    #[inline]
    pub fn location(&self) -> TextPos {
        self.location
    }

    /// The source span covered by the lexeme.
    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.location, text_pos(self.lexeme.len()))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_literal() {
            write!(f, "@{} {}({})", self.location, self.kind, self.lexeme)
        } else {
            write!(f, "@{} {}", self.location, self.kind)
        }
    }
}
