//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod trace;

// Re-export main command functions
pub use trace::{
    execute_trace, execute_trace_with, list_functions, render_graphs, trace_binary,
    validate_args, write_summaries, TraceArgs, TracedBinary,
};
