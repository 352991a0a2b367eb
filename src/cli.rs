//! CLI command implementations for Turnpipe.

pub(crate) mod build;
pub(crate) mod run;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Game layout for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum GameKind {
    /// Graph with exit gateways.
    Gateway,
    /// Grid maze with pacs and pellets.
    Pellets,
    /// Territory map with mines, buildings, and units.
    Mines,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
    code: u8,
}

impl CliError {
    /// Create a new CLI error exiting with status 1.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 1,
        }
    }

    /// Process exit status for this error.
    pub(crate) fn exit_code(&self) -> u8 {
        self.code
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<turnpipe::ShimError> for CliError {
    fn from(e: turnpipe::ShimError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<turnpipe::ConfigError> for CliError {
    fn from(e: turnpipe::ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<turnpipe::BuildError> for CliError {
    fn from(e: turnpipe::BuildError) -> Self {
        // Exit statuses outside 1..=255 cannot be passed through.
        let code = u8::try_from(e.exit_code())
            .ok()
            .filter(|c| *c != 0)
            .unwrap_or(1);
        Self {
            message: e.to_string(),
            code,
        }
    }
}
