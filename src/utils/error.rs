//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while parsing debugger output
#[derive(Error, Debug)]
pub enum ParseError {
    #[error(
        "unable to find start of defined functions (expected {marker:?}); \
         is the binary built with debug info and is the debugger compatible?"
    )]
    MissingMarker { marker: &'static str },

    #[error("invalid line number {token:?} in function listing line {line:?}")]
    InvalidLineNumber { line: String, token: String },

    #[error("unable to parse stack frame line {line:?}")]
    InvalidFrame { line: String },
}

/// Errors that can occur while running the debugger
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("failed to launch debugger {program:?}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("debugger I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("debugger exited with {status}: {stderr}")]
    DebuggerFailed { status: ExitStatus, stderr: String },

    #[error("unexpected function listing: {0}")]
    ListingFailed(#[from] ParseError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
