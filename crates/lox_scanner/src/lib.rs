//! lox_scanner: Lexer/tokenizer for Lox source code.
//!
//! Produces the complete token sequence for a source string in one pass:
//! - Single and two-character operators
//! - String literals (multi-line allowed) and number literals
//! - Identifiers and reserved keywords
//! - Line comments and whitespace are skipped
//!
//! Malformed input never aborts a scan. Problems are returned as
//! diagnostics alongside the tokens.

mod char_codes;
mod scanner;
mod token;
mod token_kind;

pub use scanner::{tokenize, ScanResult, Scanner};
pub use token::{Literal, Token};
pub use token_kind::TokenKind;
