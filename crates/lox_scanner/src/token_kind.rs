//! TokenKind enum - the closed set of Lox token kinds.

use std::fmt;

/// The kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    Eof,

    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Semicolon,
    Minus,
    Plus,
    Slash,
    Star,

    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    Or,
    True,
    False,
    If,
    Else,
    For,
    While,
    Class,
    Super,
    This,
    Fun,
    Nil,
    Var,
    Print,
    Return,
}

impl TokenKind {
    /// Look up a reserved word. Returns `None` for anything that is not a keyword.
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        match text {
            "and" => Some(TokenKind::And),
            "class" => Some(TokenKind::Class),
            "else" => Some(TokenKind::Else),
            "false" => Some(TokenKind::False),
            "fun" => Some(TokenKind::Fun),
            "for" => Some(TokenKind::For),
            "if" => Some(TokenKind::If),
            "nil" => Some(TokenKind::Nil),
            "or" => Some(TokenKind::Or),
            "print" => Some(TokenKind::Print),
            "return" => Some(TokenKind::Return),
            "super" => Some(TokenKind::Super),
            "this" => Some(TokenKind::This),
            "true" => Some(TokenKind::True),
            "var" => Some(TokenKind::Var),
            "while" => Some(TokenKind::While),
            _ => None,
        }
    }

    /// Whether this kind is a reserved word.
    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u8;
        v >= TokenKind::And as u8 && v <= TokenKind::Return as u8
    }

    /// Whether tokens of this kind carry a literal payload.
    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::String | TokenKind::Number
        )
    }

    /// The name used when rendering tokens.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::Comma => "Comma",
            TokenKind::Dot => "Dot",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::Minus => "Minus",
            TokenKind::Plus => "Plus",
            TokenKind::Slash => "Slash",
            TokenKind::Star => "Star",
            TokenKind::Bang => "Bang",
            TokenKind::BangEqual => "BangEqual",
            TokenKind::Equal => "Equal",
            TokenKind::EqualEqual => "EqualEqual",
            TokenKind::Greater => "Greater",
            TokenKind::GreaterEqual => "GreaterEqual",
            TokenKind::Less => "Less",
            TokenKind::LessEqual => "LessEqual",
            TokenKind::Identifier => "Identifier",
            TokenKind::String => "String",
            TokenKind::Number => "Number",
            TokenKind::And => "And",
            TokenKind::Or => "Or",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::If => "If",
            TokenKind::Else => "Else",
            TokenKind::For => "For",
            TokenKind::While => "While",
            TokenKind::Class => "Class",
            TokenKind::Super => "Super",
            TokenKind::This => "This",
            TokenKind::Fun => "Fun",
            TokenKind::Nil => "Nil",
            TokenKind::Var => "Var",
            TokenKind::Print => "Print",
            TokenKind::Return => "Return",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
