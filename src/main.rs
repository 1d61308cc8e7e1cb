#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! composectl — print GraphQL schemas and inspect composite models.

mod cli;
mod commands;
mod composite;
mod exec;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, OutputCtx, reporter_for};
use commands::Session;
use exec::read_piped_stdin;

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// Run the selected command and return the process exit code.
fn run(cli: &Cli) -> anyhow::Result<i32> {
    init_logging(cli.debug)?;
    // A read failure is reported by the command, through its status reporter.
    let piped = read_piped_stdin();

    let mut reporter = reporter_for(cli.json, cli.quiet);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut session = Session {
        piped,
        ctx: OutputCtx::new(cli.format, cli.json),
        reporter: reporter.as_mut(),
        stdout: &mut out,
    };

    Ok(match commands::dispatch(&cli.command, &mut session) {
        Ok(()) => 0,
        Err(err) => err.exit_code(),
    })
}

/// Log to stderr only; stdout is reserved for command results.
fn init_logging(debug: bool) -> anyhow::Result<()> {
    let filter = if debug {
        EnvFilter::new("composectl=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
