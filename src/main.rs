// Entrypoint for the bogg CLI.
// - Keeps `main` small: set up logging, parse arguments and hand off to
//   `cli::run`.
// - Fatal errors (a rejected entry, an unimplemented feature) are printed
//   as plain text and end the process with a failure code.

use std::io;
use std::process::ExitCode;

use bogg_cli::cli::{self, Cli};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
