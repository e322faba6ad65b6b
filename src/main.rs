//! gdb-callgraph CLI
//!
//! Traces executables under GDB and writes their call graphs in
//! Graphviz DOT format.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use gdb_callgraph::commands::{execute_trace, validate_args, TraceArgs};
use gdb_callgraph::debugger::GdbConfig;
use gdb_callgraph::utils::config::{DEBUGGER_ENV_VAR, DEFAULT_DEBUGGER};

/// Generate call graphs by tracing executables with GDB
#[derive(Parser, Debug)]
#[command(name = "callgraph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Executables to trace (built with debug info)
    #[arg(required = true)]
    binaries: Vec<PathBuf>,

    /// Output path for the DOT call graph (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output path for a JSON trace report (optional)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Debugger program
    #[arg(long, env = DEBUGGER_ENV_VAR, default_value = DEFAULT_DEBUGGER)]
    gdb: String,

    /// Extra argument for the debugger (repeatable)
    #[arg(long = "gdb-arg", allow_hyphen_values = true)]
    gdb_args: Vec<String>,

    /// Argument for the traced program (repeatable)
    #[arg(long = "arg", allow_hyphen_values = true)]
    run_args: Vec<String>,

    /// Parse the transcript even if the debugger exits with an error
    #[arg(long)]
    keep_partial: bool,

    /// Print edge statistics (to stderr when the graph goes to stdout)
    #[arg(long)]
    summary: bool,

    /// Number of most frequent edges in the summary
    #[arg(long, default_value = "10")]
    top_edges: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let gdb = GdbConfig::new()
        .with_program(cli.gdb)
        .with_extra_args(cli.gdb_args)
        .with_keep_partial(cli.keep_partial);

    let args = TraceArgs {
        binaries: cli.binaries,
        output: cli.output,
        json_report: cli.json,
        run_args: cli.run_args,
        gdb,
        print_summary: cli.summary,
        top_edges: cli.top_edges,
    };

    // Validate args first
    validate_args(&args)?;

    // Execute trace
    execute_trace(args)?;

    Ok(())
}
