//! Conquest CLI - play a territory conquest game in the terminal.

mod console;
mod controller;
mod display;
mod error;

use clap::Parser;
use console::Console;
use conquest_core::{GameSettings, SeededRandomness};
use error::CliError;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Conquest - roll dice, take territories, complete your mission
#[derive(Parser, Debug)]
#[command(name = "conquest")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of territories (prompted for when omitted)
    #[arg(short, long)]
    territories: Option<i64>,

    /// Random seed (default: settings file, then the clock)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Write the final session as JSON to this file
    #[arg(long, value_name = "FILE")]
    dump_json: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());
    let result = run(&args, &mut console);
    if let Err(err) = &result {
        tracing::error!(error = %err, "setup failed");
        eprintln!("Error: {}", err);
    }
    ExitCode::from(exit_status(&result))
}

/// Process status for a finished run: 0 on completion, 1 on any fatal error.
fn exit_status(result: &Result<(), CliError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn load_settings(path: Option<&Path>) -> Result<GameSettings, CliError> {
    match path {
        Some(path) => Ok(GameSettings::load(path)?),
        None => Ok(GameSettings::default()),
    }
}

/// `--seed` wins over the settings file; with neither, seed from the clock.
fn build_rng(flag: Option<u64>, settings: &GameSettings) -> SeededRandomness {
    match flag.or(settings.seed) {
        Some(seed) => SeededRandomness::new(seed),
        None => SeededRandomness::from_time(),
    }
}

fn run<R: BufRead, W: Write>(args: &Args, console: &mut Console<R, W>) -> Result<(), CliError> {
    let settings = load_settings(args.settings.as_deref())?;
    let mut rng = build_rng(args.seed, &settings);
    tracing::info!(seed = rng.seed(), "Conquest starting");

    let session = controller::run_game(console, &settings, args.territories, &mut rng)?;
    console.say("\nGame over.")?;

    if let Some(path) = &args.dump_json {
        std::fs::write(path, session.to_json()?)?;
        tracing::info!(path = %path.display(), "session written");
    }
    Ok(())
}
