//! Configuration and constants for the CLI.

/// Debugger program used when none is given
pub const DEFAULT_DEBUGGER: &str = "gdb";

/// Environment variable that overrides the debugger program
pub const DEBUGGER_ENV_VAR: &str = "CALLGRAPH_GDB";

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Number of frames requested per breakpoint hit (callee + caller)
pub const BACKTRACE_DEPTH: usize = 2;

// Commands that make GDB output machine-parseable (no paging, no wrapping)
pub const SESSION_SETUP_COMMANDS: &[&str] = &[
    "set width 0",
    "set height 0",
    "set pagination off",
    "set confirm off",
    "set verbose off",
];

// Transcript markers
pub const FUNCTIONS_MARKER: &str = "All defined functions:";
pub const FILE_CONTEXT_PREFIX: &str = "File ";
pub const BREAKPOINT_DELIMITER: &str = "\nBreakpoint ";
