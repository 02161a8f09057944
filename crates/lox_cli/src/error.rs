//! Driver-level failures and the exit codes they map to.

use std::path::PathBuf;

/// Exit codes follow the BSD `sysexits.h` conventions.
pub const EX_USAGE: i32 = 64;
pub const EX_DATAERR: i32 = 65;
pub const EX_NOINPUT: i32 = 66;
pub const EX_IOERR: i32 = 74;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum CliError {
    #[error("Usage: lox [script]")]
    #[diagnostic(code(lox::usage))]
    Usage,

    #[error("could not read script '{}'", .path.display())]
    #[diagnostic(code(lox::read_script), help("check that the file exists and is readable"))]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The script was tokenized but produced errors. They have already been
    /// reported by the time this is returned.
    #[error("script produced {count} scan error(s)")]
    #[diagnostic(code(lox::scan_failed))]
    ScanFailed { count: usize },

    #[error("failed to read from standard input")]
    #[diagnostic(code(lox::input))]
    Input(#[source] std::io::Error),

    #[error("failed to write output")]
    #[diagnostic(code(lox::output))]
    Output(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage => EX_USAGE,
            CliError::ScanFailed { .. } => EX_DATAERR,
            CliError::ReadScript { .. } => EX_NOINPUT,
            CliError::Input(_) | CliError::Output(_) => EX_IOERR,
        }
    }
}
