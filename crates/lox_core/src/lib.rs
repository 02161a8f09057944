//! lox_core: Core utilities shared by the lox toolchain.
//!
//! Provides the byte-offset position and span types that tokens and
//! diagnostics use to point back into source text.

pub mod text;

// Re-export commonly used types
pub use text::{text_pos, TextPos, TextSpan};
