//! Batchx CLI - Batch extraction of archives with 7-Zip.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let bar = cli.extract.progress && progress::BatchProgress::should_show();
    logging::init(cli.verbose, cli.quiet || bar);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    let result = match cli.command {
        Some(cli::Commands::Completions { shell }) => {
            commands::completion::execute(shell);
            Ok(())
        }
        None => commands::extract::execute(&cli.extract, &*formatter),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err.root_cause());
            formatter.format_error(&err);
            error::exit_code(&err)
        }
    }
}
