#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use hintr_cli::args::CliArgs;
use hintr_cli::reporter::Reporter;
use hintr_cli::{EXIT_FAULT, driver};

fn main() -> ExitCode {
    // Installs a subscriber only when HINTR_LOG or RUST_LOG is set.
    hintr_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            eprintln!("hintr: {err:#}");
            ExitCode::from(EXIT_FAULT)
        }
    }
}

fn run(args: &CliArgs) -> Result<u8> {
    let color = !args.no_color && std::io::stdout().is_terminal();
    colored::control::set_override(color);

    let result = driver::run(args)?;
    let reporter = Reporter::new(args.reporter, color)
        .verbose(args.verbose)
        .show_summary(args.show_summary);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(reporter.render(&result).as_bytes())?;
    stdout.flush()?;

    for (path, fault) in result.failures() {
        eprintln!("hintr: {}: {fault}", path.display());
    }
    Ok(result.exit_status(args.max_warnings))
}
