//! lox: command-line driver for the Lox scanner.
//!
//! Usage:
//!   lox [options] [script]
//!
//! Without a script, starts an interactive prompt that echoes the tokens of
//! each line. With a script, tokenizes the whole file and exits with status 65
//! if it contained errors.

mod driver;
mod error;
mod report;

use clap::Parser as ClapParser;
use driver::RunOptions;
use error::CliError;
use report::Reporter;
use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Once;

#[derive(ClapParser, Debug)]
#[command(
    name = "lox",
    about = "lox - tokenize Lox scripts or an interactive session",
    disable_version_flag = true
)]
struct Cli {
    /// Script to tokenize. Starts an interactive prompt when omitted.
    #[arg(value_name = "SCRIPT")]
    scripts: Vec<PathBuf>,

    /// Render diagnostics with the offending source snippet.
    #[arg(long)]
    pretty: bool,

    /// Only report diagnostics; do not echo tokens.
    #[arg(long = "no-echo")]
    no_echo: bool,

    /// Print the version.
    #[arg(short = 'v', long)]
    version: bool,
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output on stderr.
///
/// Enable with `RUST_LOG=lox_scanner=debug` or `RUST_LOG=trace`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if cli.version {
        println!("lox Version {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let exit_code = match dispatch(&cli) {
        Ok(()) => 0,
        Err(error) => {
            let code = error.exit_code();
            report_cli_error(error, cli.pretty);
            code
        }
    };
    process::exit(exit_code);
}

fn dispatch(cli: &Cli) -> Result<(), CliError> {
    let options = RunOptions {
        echo: !cli.no_echo,
        reporter: Reporter { pretty: cli.pretty },
    };

    match cli.scripts.as_slice() {
        [] => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let stderr = io::stderr();
            driver::run_prompt(
                &mut stdin.lock(),
                &options,
                &mut stdout.lock(),
                &mut stderr.lock(),
            )
        }
        [script] => driver::run_file(script, &options),
        _ => Err(CliError::Usage),
    }
}

fn report_cli_error(error: CliError, pretty: bool) {
    match error {
        // Scan errors were already reported one by one.
        CliError::ScanFailed { .. } => {}
        CliError::Usage => println!("{error}"),
        _ if pretty => eprintln!("{:?}", miette::Report::new(error)),
        _ => {
            eprintln!("error: {error}");
            if let Some(source) = std::error::Error::source(&error) {
                eprintln!("  caused by: {source}");
            }
        }
    }
}
