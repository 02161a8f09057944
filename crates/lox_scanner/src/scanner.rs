//! The Lox scanner.
//!
//! Converts source text into the full token sequence in one forward pass.
//! The scanner never stops on bad input: every problem becomes a diagnostic
//! and scanning resumes at the next character.

use crate::char_codes::*;
use crate::token::{Literal, Token};
use crate::token_kind::TokenKind;
use lox_core::text::{text_pos, TextSpan};
use lox_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use memchr::{memchr, memchr_iter};
use tracing::{debug, trace};

/// The output of a complete scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    /// All tokens in source order, always terminated by a single `Eof`.
    pub tokens: Vec<Token>,
    /// Problems found while scanning, in the order they were found.
    pub diagnostics: DiagnosticCollection,
    /// The 1-based line the scanner was on when it reached the end of input.
    pub lines: u32,
}

impl ScanResult {
    /// Whether any error was reported during the scan.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Tokenize `source` with a fresh scanner.
///
/// Positions are 32-bit byte offsets. For sources of 4 GiB and more, offsets
/// past `u32::MAX` saturate at `u32::MAX`.
#[tracing::instrument(level = "debug", skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str) -> ScanResult {
    Scanner::new(source).scan_tokens()
}

/// Single-use scanner over a borrowed source buffer.
pub struct Scanner<'src> {
    /// The source text being scanned.
    source: &'src str,
    /// Byte offset of the first character of the token being recognized.
    start: usize,
    /// Byte offset of the next character to examine.
    current: usize,
    /// Current 1-based line.
    line: u32,
    /// Tokens produced so far.
    tokens: Vec<Token>,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl<'src> Scanner<'src> {
    /// Create a new scanner for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Scan the whole source, consuming the scanner.
    pub fn scan_tokens(mut self) -> ScanResult {
        while !self.is_eof() {
            self.start = self.current;
            self.scan_token();
        }
        self.tokens
            .push(Token::bare(TokenKind::Eof, text_pos(self.source.len())));

        debug!(
            tokens = self.tokens.len(),
            errors = self.diagnostics.error_count(),
            "scan complete"
        );

        ScanResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
            lines: self.line,
        }
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Look at the character at the current position without advancing.
    #[inline]
    fn current_char(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    /// Look at the character after the current one.
    #[inline]
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next()
    }

    /// Consume the current character and return it.
    #[inline]
    fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.current += ch.len_utf8();
        Some(ch)
    }

    /// Consume the current character only if it is `expected`.
    #[inline]
    fn eat(&mut self, expected: char) -> bool {
        if self.current_char() == Some(expected) {
            self.current += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.current_char() {
            if !predicate(ch) {
                break;
            }
            self.current += ch.len_utf8();
        }
    }

    /// Whether we've reached the end of the text.
    #[inline]
    fn is_eof(&self) -> bool {
        self.current >= self.source.len()
    }

    /// The text of the token being recognized.
    #[inline]
    fn lexeme(&self) -> &'src str {
        &self.source[self.start..self.current]
    }

    fn scan_token(&mut self) {
        let Some(ch) = self.advance() else {
            return;
        };

        match ch {
            LINE_FEED => self.line += 1,

            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            ';' => self.add_token(TokenKind::Semicolon),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            '*' => self.add_token(TokenKind::Star),

            '=' => self.add_token_if_equals(TokenKind::EqualEqual, TokenKind::Equal),
            '!' => self.add_token_if_equals(TokenKind::BangEqual, TokenKind::Bang),
            '>' => self.add_token_if_equals(TokenKind::GreaterEqual, TokenKind::Greater),
            '<' => self.add_token_if_equals(TokenKind::LessEqual, TokenKind::Less),

            SLASH => {
                if self.eat(SLASH) {
                    self.skip_line_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            DOUBLE_QUOTE => self.scan_string(),

            c if is_digit(c) => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier(),
            c if is_white_space_single_line(c) => {}

            c => {
                let text = c.to_string();
                self.error(&messages::UNEXPECTED_CHARACTER_0, &[text.as_str()]);
            }
        }
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn add_token_if_equals(&mut self, compound: TokenKind, single: TokenKind) {
        let kind = if self.eat(EQUALS) { compound } else { single };
        self.add_token(kind);
    }

    /// Skip to the next line feed (left for the main loop) or end of input.
    fn skip_line_comment(&mut self) {
        let rest = &self.source.as_bytes()[self.current..];
        self.current = match memchr(b'\n', rest) {
            Some(offset) => self.current + offset,
            None => self.source.len(),
        };
    }

    fn scan_string(&mut self) {
        let rest = &self.source.as_bytes()[self.current..];
        match memchr(b'"', rest) {
            Some(offset) => {
                self.line += memchr_iter(b'\n', &rest[..offset]).count() as u32;
                let body_end = self.current + offset;
                self.current = body_end + 1;
                let value = self.source[self.start + 1..body_end].to_string();
                self.add_literal_token(TokenKind::String, Literal::String(value));
            }
            None => {
                self.line += memchr_iter(b'\n', rest).count() as u32;
                self.current = self.source.len();
                self.error(&messages::UNTERMINATED_STRING, &[]);
            }
        }
    }

    fn scan_number(&mut self) {
        self.eat_while(is_digit);

        // A dot only belongs to the number when a digit follows it.
        if self.current_char() == Some(DOT) && self.peek_next().is_some_and(is_digit) {
            self.current += DOT.len_utf8();
            self.eat_while(is_digit);
        }

        let text = self.lexeme();
        match text.parse::<f64>() {
            Ok(value) => self.add_literal_token(TokenKind::Number, Literal::Number(value)),
            // Digits with at most one inner dot always parse; on failure no token is emitted.
            Err(_) => self.error(&messages::UNABLE_TO_PARSE_NUMBER_0, &[text]),
        }
    }

    fn scan_identifier(&mut self) {
        self.eat_while(is_identifier_part);

        let text = self.lexeme();
        match TokenKind::from_keyword(text) {
            Some(keyword) => self.add_token(keyword),
            None => self.add_literal_token(
                TokenKind::Identifier,
                Literal::Identifier(text.to_string()),
            ),
        }
    }

    // ========================================================================
    // Output
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind) {
        self.tokens.push(Token::new(
            kind,
            self.lexeme(),
            None,
            text_pos(self.start),
        ));
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Literal) {
        self.tokens.push(Token::new(
            kind,
            self.lexeme(),
            Some(literal),
            text_pos(self.start),
        ));
    }

    fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let span = TextSpan::from_bounds(text_pos(self.start), text_pos(self.current));
        let diagnostic = Diagnostic::with_location(span, self.line, message, args);
        trace!(
            line = self.line,
            code = diagnostic.code,
            message = %diagnostic.message_text,
            "scanner diagnostic"
        );
        self.diagnostics.add(diagnostic);
    }
}
