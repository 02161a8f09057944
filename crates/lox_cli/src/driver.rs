//! Script and prompt modes.

use crate::error::CliError;
use crate::report::Reporter;
use lox_scanner::tokenize;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

/// Settings shared by both modes, taken from the command line.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Echo every token to stdout.
    pub echo: bool,
    pub reporter: Reporter,
}

/// Tokenize one source buffer, echo its tokens and report its diagnostics.
///
/// Returns the number of errors found.
pub fn run(
    source: &str,
    name: &str,
    options: &RunOptions,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<usize> {
    let result = tokenize(source);

    if options.echo {
        for token in &result.tokens {
            writeln!(out, "{token}")?;
        }
    }
    options
        .reporter
        .report(&result.diagnostics, name, source, err)?;

    Ok(result.diagnostics.error_count())
}

/// Tokenize a whole script file.
pub fn run_file(path: &Path, options: &RunOptions) -> Result<(), CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::ReadScript {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = source.len(), "tokenizing script");

    let name = path.display().to_string();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let count = run(
        &source,
        &name,
        options,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )?;

    if count > 0 {
        return Err(CliError::ScanFailed { count });
    }
    Ok(())
}

/// Interactive prompt. Each line is scanned on its own, so errors on one line
/// never affect the next. A blank line or end of input ends the session.
///
/// Lines are read as bytes; invalid UTF-8 is replaced with U+FFFD.
pub fn run_prompt(
    input: &mut impl BufRead,
    options: &RunOptions,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<(), CliError> {
    let mut buf = Vec::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).map_err(CliError::Input)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let source = line.trim_end_matches(['\n', '\r']);
        if source.is_empty() {
            break;
        }

        let count = run(source, "<stdin>", options, out, err)?;
        debug!(errors = count, "prompt line scanned");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    const PLAIN: RunOptions = RunOptions {
        echo: true,
        reporter: Reporter { pretty: false },
    };

    fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).expect("output is UTF-8")
    }

    #[test]
    fn test_run_echoes_tokens() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let count = run("var hello = \"world\";", "t.lox", &PLAIN, &mut out, &mut err)
            .expect("in-memory writes succeed");

        assert_eq!(count, 0);
        assert_eq!(
            output(out),
            "@0 Var\n@4 Identifier(hello)\n@10 Equal\n@12 String(\"world\")\n@19 Semicolon\n@20 EOF\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_without_echo_only_reports() {
        let options = RunOptions { echo: false, ..PLAIN };
        let mut out = Vec::new();
        let mut err = Vec::new();
        let count = run("@ #", "t.lox", &options, &mut out, &mut err)
            .expect("in-memory writes succeed");

        assert_eq!(count, 2);
        assert!(out.is_empty());
        assert_eq!(
            output(err),
            "[line 1] Error: Unexpected character '@'.\n[line 1] Error: Unexpected character '#'.\n"
        );
    }

    #[test]
    fn test_prompt_scans_each_line_independently() {
        let mut input = Cursor::new("\"open\n1\n");
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_prompt(&mut input, &PLAIN, &mut out, &mut err).expect("prompt succeeds");

        assert_eq!(output(out), "> @5 EOF\n> @0 Number(1)\n@1 EOF\n> ");
        // The second line starts fresh at line 1 with no leftover errors.
        assert_eq!(output(err), "[line 1] Error: Unterminated string.\n");
    }

    #[test]
    fn test_prompt_stops_at_blank_line() {
        let mut input = Cursor::new("+\r\n\r\n-\n");
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_prompt(&mut input, &PLAIN, &mut out, &mut err).expect("prompt succeeds");

        assert_eq!(output(out), "> @0 Plus\n@1 EOF\n> ");
        assert!(err.is_empty());
    }

    #[test]
    fn test_prompt_continues_after_invalid_utf8() {
        let mut input = Cursor::new(b"+\n\xff\n-\n".to_vec());
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_prompt(&mut input, &PLAIN, &mut out, &mut err).expect("prompt succeeds");

        assert_eq!(
            output(out),
            "> @0 Plus\n@1 EOF\n> @3 EOF\n> @0 Minus\n@1 EOF\n> "
        );
        assert_eq!(
            output(err),
            "[line 1] Error: Unexpected character '\u{FFFD}'.\n"
        );
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("stdin closed"))
        }
    }

    #[test]
    fn test_prompt_read_failure_is_input_error() {
        let mut input = io::BufReader::new(FailingReader);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let error = run_prompt(&mut input, &PLAIN, &mut out, &mut err)
            .expect_err("read failure must end the session");

        assert!(matches!(error, CliError::Input(_)));
        assert_eq!(error.exit_code(), 74);
        assert_eq!(output(out), "> ");
    }

    #[test]
    fn test_run_file_missing_script() {
        let error = run_file(Path::new("definitely/not/here.lox"), &PLAIN)
            .expect_err("missing file must fail");
        assert!(matches!(error, CliError::ReadScript { .. }));
        assert_eq!(error.exit_code(), 66);
    }
}
