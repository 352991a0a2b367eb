//! Turnpipe CLI - run a game shim or build a submission.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Turnpipe - turn shims and submission builder for programming games
#[derive(Parser, Debug)]
#[command(name = "turnpipe")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Read a game's turns from stdin and relay them to an engine
    Run {
        /// Input layout to parse
        game: cli::GameKind,

        /// Answer every turn with this action instead of running an engine
        #[arg(long, conflicts_with = "engine")]
        echo: Option<String>,

        /// Engine command and its arguments (after `--`)
        #[arg(last = true)]
        engine: Vec<String>,
    },

    /// Compile, minify, and assemble the submission file
    Build,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Run { game, echo, engine } => cli::run::execute(game, echo, engine),
        Commands::Build => cli::build::execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
