//! Character constants and classification predicates used by the scanner.

pub const LINE_FEED: char = '\n';
pub const DOUBLE_QUOTE: char = '"';
pub const DOT: char = '.';
pub const SLASH: char = '/';
pub const EQUALS: char = '=';
pub const UNDERSCORE: char = '_';

/// Check if a character is a decimal digit. Only ASCII digits start numbers.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Check if a character can start an identifier.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == UNDERSCORE || ch.is_alphabetic()
}

/// Check if a character can continue an identifier.
#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch == UNDERSCORE || ch.is_alphanumeric()
}

/// Check if a character is whitespace other than a line feed.
///
/// `\r` lands here, so CRLF input counts lines through the `\n` alone.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    ch != LINE_FEED && ch.is_whitespace()
}
