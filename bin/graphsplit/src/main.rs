mod chunk;
mod cli;
mod commp;
mod error;
mod restore;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Chunk(args) => chunk::run(args),
        Command::Restore(args) => restore::run(args),
        Command::Commp(args) => commp::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `-v` raises the default filter one notch at a time; `RUST_LOG` always
/// wins when set, matching the teacher's `tracing-subscriber` setup.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("graphsplit={default_level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
