use std::process::exit;

use clap::Parser;
use liberty_cli::{args::LibertyArgs, logging::setup_stderr_logging, Liberty};

fn main() {
    let cli = LibertyArgs::parse();

    let colors = match cli.color {
        liberty_cli::args::Colors::Auto => atty::is(atty::Stream::Stderr),
        liberty_cli::args::Colors::Always => true,
        liberty_cli::args::Colors::Never => false,
    };
    setup_stderr_logging(cli.log_spans, cli.verbose, colors);

    match Liberty::new().execute(cli) {
        Ok(()) => exit(0),
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "operation failed");
            eprintln!("error: {error:#}");
            exit(1);
        }
    }
}
