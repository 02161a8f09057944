//! Rendering of scanner diagnostics.
//!
//! The plain form is the line-prefixed report (`[line N] Error: ...`). With
//! `--pretty` each diagnostic is rendered by miette with the offending source
//! snippet underlined.

use lox_diagnostics::Diagnostic;
use miette::{LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use std::io::{self, Write};

/// A scanner diagnostic bundled with the source it points into.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ScanReport {
    message: String,
    code: String,
    line: u32,
    span: SourceSpan,
    source_code: NamedSource<String>,
}

impl ScanReport {
    pub fn new(diagnostic: &Diagnostic, name: &str, source: &str) -> Self {
        Self {
            message: diagnostic.message_text.clone(),
            code: diagnostic.code_label(),
            line: diagnostic.line,
            span: SourceSpan::from(diagnostic.span.to_range()),
            source_code: NamedSource::new(name, source.to_string()),
        }
    }
}

impl miette::Diagnostic for ScanReport {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(Some(format!("line {}", self.line)), self.span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Writes diagnostics in the configured style.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    pub pretty: bool,
}

impl Reporter {
    pub fn report<'a>(
        &self,
        diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
        name: &str,
        source: &str,
        err: &mut impl Write,
    ) -> io::Result<()> {
        for diagnostic in diagnostics {
            if self.pretty {
                let report = miette::Report::new(ScanReport::new(diagnostic, name, source));
                writeln!(err, "{report:?}")?;
            } else {
                writeln!(err, "{diagnostic}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lox_scanner::tokenize;

    fn render(pretty: bool, source: &str) -> String {
        let result = tokenize(source);
        let mut err = Vec::new();
        Reporter { pretty }
            .report(&result.diagnostics, "test.lox", source, &mut err)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(err).expect("reports are UTF-8")
    }

    #[test]
    fn test_plain_report() {
        assert_eq!(
            render(false, "1\n@ \"open"),
            "[line 2] Error: Unexpected character '@'.\n[line 2] Error: Unterminated string.\n"
        );
    }

    #[test]
    fn test_pretty_report_mentions_code_and_message() {
        let rendered = render(true, "var a = @;");
        assert!(rendered.contains("LX1003"), "{rendered}");
        assert!(rendered.contains("Unexpected character '@'."), "{rendered}");
    }

    #[test]
    fn test_scan_report_points_at_span() {
        let source = "ok €";
        let result = tokenize(source);
        let report = ScanReport::new(&result.diagnostics.diagnostics()[0], "x.lox", source);
        assert_eq!(report.span, SourceSpan::from(3..6));
        assert_eq!(report.to_string(), "Unexpected character '€'.");
    }
}
