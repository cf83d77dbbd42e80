//! Errors that end the program.

use crate::console::ConsoleError;
use conquest_core::{GameError, SettingsError};

/// Fatal CLI errors. Each maps to exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid territory count '{0}': expected a positive integer")]
    InvalidCount(String),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not serialize session: {0}")]
    Dump(#[from] serde_json::Error),
}
