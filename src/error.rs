//! Error types for the shims, engines, and the build pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Malformed or truncated turn input.
///
/// Line numbers are 1-based and count every line consumed from the input.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input ended in the middle of a record.
    #[error("line {line}: unexpected end of input while reading {field}")]
    UnexpectedEof {
        /// Line number that was expected.
        line: usize,
        /// Field being read.
        field: &'static str,
    },
    /// A line had fewer tokens than the record layout declares.
    #[error("line {line}: missing token for {field}")]
    MissingToken {
        /// Line number of the short line.
        line: usize,
        /// Field whose token is absent.
        field: &'static str,
    },
    /// A token did not start with an integer.
    #[error("line {line}: {field} is not an integer: {token:?}")]
    InvalidInteger {
        /// Line number of the token.
        line: usize,
        /// Field being parsed.
        field: &'static str,
        /// The offending token.
        token: String,
    },
    /// A count field was negative.
    #[error("line {line}: {field} must not be negative, got {value}")]
    NegativeCount {
        /// Line number of the count.
        line: usize,
        /// Count field name.
        field: &'static str,
        /// Parsed value.
        value: i32,
    },
    /// Reading from the input stream failed.
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Failure at the engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine process could not be started.
    #[error("failed to start engine `{program}`: {source}")]
    Spawn {
        /// Program that was spawned.
        program: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Talking to the engine failed.
    #[error("engine I/O failed: {0}")]
    Io(#[from] io::Error),
    /// A record could not be encoded for the engine.
    #[error("failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),
    /// The engine sent a line that is not a valid port message.
    #[error("invalid engine message {line:?}: {source}")]
    Protocol {
        /// Raw line received.
        line: String,
        /// Decode error.
        #[source]
        source: serde_json::Error,
    },
    /// The engine closed its output before finishing the turn.
    #[error("engine disconnected before finishing turn {turn}")]
    Disconnected {
        /// Turn number (0-based) that was in flight.
        turn: u64,
    },
}

/// Failure of a shim run.
#[derive(Debug, Error)]
pub enum ShimError {
    /// Input could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The engine failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Writing an emission to stdout or stderr failed.
    #[error("failed to write emission: {0}")]
    Output(#[source] io::Error),
}

/// Failure of the build pipeline.
#[derive(Debug, Error)]
pub enum BuildError {
    /// An external program could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// An external program exited unsuccessfully.
    #[error("`{program}` exited with {}", describe_status(.code))]
    Status {
        /// Program name.
        program: String,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
    },
    /// Reading or writing a build file failed.
    #[error("{}: {source}", .path.display())]
    File {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// Process exit code to terminate with.
    ///
    /// The failing program's status when it has a non-zero one, otherwise 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::Status {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_status(code: &Option<i32>) -> String {
    code.map_or_else(|| "no exit code".to_string(), |c| format!("status {c}"))
}

/// Failure loading `turnpipe.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML for the expected schema.
    #[error("invalid config {}: {source}", .path.display())]
    Decode {
        /// Config path.
        path: PathBuf,
        /// Decode error.
        #[source]
        source: toml::de::Error,
    },
}
