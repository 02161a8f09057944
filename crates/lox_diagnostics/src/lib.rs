//! lox_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Diagnostics are plain values collected by the phase that produces them and
//! handed back to the caller. Nothing here prints or keeps global state; the
//! driver decides how to render a diagnostic and which exit code it implies.

use lox_core::text::TextSpan;
use std::fmt;

/// A diagnostic message template with a code.
///
/// Every scanner diagnostic is an error: it makes a script run fail.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code, rendered as `LX<code>`.
    pub code: u32,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The source text span the diagnostic points at.
    pub span: TextSpan,
    /// 1-based line number at the moment the problem was detected.
    pub line: u32,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
}

impl Diagnostic {
    /// Create a new diagnostic pointing at `span` on `line`.
    pub fn with_location(
        span: TextSpan,
        line: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            span,
            line,
            message_text: format_message(message.message, args),
            code: message.code,
        }
    }

    /// The code as displayed to users, e.g. `LX1003`.
    pub fn code_label(&self) -> String {
        format!("LX{}", self.code)
    }
}

/// Renders the line-prefixed report: `[line N] Error: <message>`.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================
    pub const UNTERMINATED_STRING: DiagnosticMessage = diag!(1001, "Unterminated string.");
    pub const UNABLE_TO_PARSE_NUMBER_0: DiagnosticMessage = diag!(1002, "Unable to parse number '{0}'.");
    pub const UNEXPECTED_CHARACTER_0: DiagnosticMessage = diag!(1003, "Unexpected character '{0}'.");
}
