//! Debugger session driver.
//!
//! Generates GDB command scripts and executes the debugger as a
//! subordinate process, capturing its transcript.

pub mod gdb;
pub mod script;

use crate::utils::error::TraceError;
use std::path::Path;

pub use gdb::{GdbConfig, GdbDebugger};
pub use script::{build_listing_script, build_trace_script};

/// Something that can run a debugger script against a binary
///
/// Implemented by [`GdbDebugger`]; tests substitute canned transcripts.
pub trait ScriptRunner {
    /// Run `script` against `binary` and return the captured standard output
    fn run_script(&self, binary: &Path, script: &str) -> Result<String, TraceError>;
}
