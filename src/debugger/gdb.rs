//! Subordinate GDB process runner.

use super::ScriptRunner;
use crate::utils::config::DEFAULT_DEBUGGER;
use crate::utils::error::TraceError;
use log::{debug, info, warn};
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

/// Debugger invocation settings
#[derive(Debug, Clone)]
pub struct GdbConfig {
    /// Debugger program to execute
    pub program: String,

    /// Extra arguments placed before the binary path
    pub extra_args: Vec<String>,

    /// Return the transcript even when the debugger exits non-zero
    pub keep_partial: bool,
}

impl Default for GdbConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_DEBUGGER.to_string(),
            extra_args: Vec::new(),
            keep_partial: false,
        }
    }
}

impl GdbConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn with_keep_partial(mut self, keep_partial: bool) -> Self {
        self.keep_partial = keep_partial;
        self
    }
}

/// Runs scripts through a GDB process, one process per script
pub struct GdbDebugger {
    config: GdbConfig,
}

impl GdbDebugger {
    pub fn new(config: GdbConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GdbConfig {
        &self.config
    }
}

impl ScriptRunner for GdbDebugger {
    /// Execute `gdb -q <binary>` with the script on standard input
    ///
    /// Blocks until the debugger terminates. Standard output and standard
    /// error are drained while the script is still being written, so a
    /// chatty session cannot stall on a full pipe.
    fn run_script(&self, binary: &Path, script: &str) -> Result<String, TraceError> {
        info!(
            "Running {} on {} ({} script lines)",
            self.config.program,
            binary.display(),
            script.lines().count()
        );

        let mut child = Command::new(&self.config.program)
            .arg("-q")
            .args(&self.config.extra_args)
            .arg(binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| TraceError::Launch {
                program: self.config.program.clone(),
                source,
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            io::Error::new(io::ErrorKind::BrokenPipe, "debugger stdin unavailable")
        })?;
        let input = script.to_owned();
        // Dropping stdin at the end of the thread sends EOF, which ends the session
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                warn!("Debugger closed its input before the whole script was sent");
            }
            Ok(Err(e)) => return Err(TraceError::Io(e)),
            Err(_) => {
                return Err(TraceError::Io(io::Error::new(
                    io::ErrorKind::Other,
                    "debugger input writer panicked",
                )))
            }
        }

        let transcript = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        debug!(
            "Debugger exited with {} ({} bytes of output)",
            output.status,
            transcript.len()
        );
        if !stderr.trim().is_empty() {
            debug!("Debugger stderr: {}", stderr.trim());
        }

        if !output.status.success() {
            if self.config.keep_partial {
                warn!(
                    "Debugger exited with {}; keeping partial transcript: {}",
                    output.status,
                    stderr.trim()
                );
            } else {
                return Err(TraceError::DebuggerFailed {
                    status: output.status,
                    stderr,
                });
            }
        }

        Ok(transcript)
    }
}
