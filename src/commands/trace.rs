//! Trace command implementation.
//!
//! The trace command, per binary:
//! 1. Lists functions with debug info
//! 2. Runs the program under the debugger with a breakpoint on each
//! 3. Parses the transcript into caller/callee edges
//!
//! and then renders and writes the outputs for all binaries at once.

use crate::aggregator::calculate_stats;
use crate::debugger::{
    build_listing_script, build_trace_script, GdbConfig, GdbDebugger, ScriptRunner,
};
use crate::graph::{render_dot, DotConfig};
use crate::output::{validate_path, write_dot, write_dot_to, write_report};
use crate::parser::{parse_functions, parse_session, FunctionSite, ParsedSession, TraceReport};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::TraceError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the trace command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct TraceArgs {
    /// Executables to trace, in order
    pub binaries: Vec<PathBuf>,

    /// Output path for the DOT graph (stdout when `None`)
    pub output: Option<PathBuf>,

    /// Output path for the JSON trace report (optional)
    pub json_report: Option<PathBuf>,

    /// Arguments passed to each traced program
    pub run_args: Vec<String>,

    /// Debugger invocation settings
    pub gdb: GdbConfig,

    /// Print edge statistics (to stderr when the graph goes to stdout)
    pub print_summary: bool,

    /// Number of most frequent edges in the summary
    pub top_edges: usize,
}

impl Default for TraceArgs {
    fn default() -> Self {
        Self {
            binaries: Vec::new(),
            output: None,
            json_report: None,
            run_args: Vec::new(),
            gdb: GdbConfig::default(),
            print_summary: false,
            top_edges: 10,
        }
    }
}

/// Everything learned from tracing one binary
#[derive(Debug, Clone)]
pub struct TracedBinary {
    pub binary: PathBuf,
    pub functions: Vec<FunctionSite>,
    pub session: ParsedSession,
}

impl TracedBinary {
    /// Convert to the JSON report format
    pub fn to_report(&self) -> TraceReport {
        use chrono::Utc;

        TraceReport {
            version: SCHEMA_VERSION.to_string(),
            binary: self.binary.display().to_string(),
            functions: self.functions.len(),
            edges: self.session.edges.clone(),
            anomalies: self.session.anomalies.clone(),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Execute the trace command with the configured GDB
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Debugger launch or exit failures
/// * Unexpected function listings
/// * File write errors
///
/// The first failing binary aborts the whole batch and nothing is written.
pub fn execute_trace(args: TraceArgs) -> Result<()> {
    let debugger = GdbDebugger::new(args.gdb.clone());
    execute_trace_with(&debugger, &args)?;
    Ok(())
}

/// Execute the trace command with any script runner
///
/// **Public** - lets callers substitute the debugger
pub fn execute_trace_with(
    runner: &dyn ScriptRunner,
    args: &TraceArgs,
) -> Result<Vec<TracedBinary>> {
    let start_time = Instant::now();

    let mut traced = Vec::with_capacity(args.binaries.len());
    for binary in &args.binaries {
        traced.push(trace_binary(runner, binary, &args.run_args)?);
    }

    let graph = render_graphs(&traced);

    match &args.output {
        Some(path) => write_dot(&graph, path).context("Failed to write call graph")?,
        None => write_dot_to(&graph, std::io::stdout().lock())
            .context("Failed to write call graph to stdout")?,
    }

    if let Some(path) = &args.json_report {
        let reports: Vec<TraceReport> = traced.iter().map(TracedBinary::to_report).collect();
        write_report(&reports, path).context("Failed to write trace report")?;
        info!("✓ Trace report written to: {}", path.display());
    }

    if args.print_summary {
        // Keep stdout a valid DOT stream when the graph is written there
        let written = if args.output.is_none() {
            write_summaries(&traced, args.top_edges, io::stderr().lock())
        } else {
            write_summaries(&traced, args.top_edges, io::stdout().lock())
        };
        written.context("Failed to print summary")?;
    }

    let elapsed = start_time.elapsed();
    info!(
        "Traced {} binaries in {:.2}s",
        traced.len(),
        elapsed.as_secs_f64()
    );

    Ok(traced)
}

/// Trace a single binary
///
/// **Public** - one binary through the whole pipeline, without writing output
pub fn trace_binary(
    runner: &dyn ScriptRunner,
    binary: &Path,
    run_args: &[String],
) -> Result<TracedBinary> {
    info!("Tracing {}", binary.display());

    info!("Step 1/3: Listing functions with debug info...");
    let functions = list_functions(runner, binary)
        .with_context(|| format!("Failed to list functions of {}", binary.display()))?;

    if functions.is_empty() {
        warn!(
            "No functions with debug info in {}; nothing to trace",
            binary.display()
        );
        return Ok(TracedBinary {
            binary: binary.to_path_buf(),
            functions,
            session: ParsedSession::default(),
        });
    }

    info!("Step 2/3: Running with {} breakpoints...", functions.len());
    let script = build_trace_script(&functions, run_args);
    let transcript = runner
        .run_script(binary, &script)
        .with_context(|| format!("Failed to trace {}", binary.display()))?;

    info!("Step 3/3: Parsing session transcript...");
    let session = parse_session(&transcript, &functions);

    for anomaly in &session.anomalies {
        warn!("{}: {}", binary.display(), anomaly);
    }
    debug!(
        "{}: {} edges from {} hits",
        binary.display(),
        session.edges.len(),
        session.hits
    );

    Ok(TracedBinary {
        binary: binary.to_path_buf(),
        functions,
        session,
    })
}

/// Write the edge statistics of every traced binary
pub fn write_summaries(
    traced: &[TracedBinary],
    top_edges: usize,
    mut writer: impl Write,
) -> io::Result<()> {
    for entry in traced {
        let stats = calculate_stats(&entry.session.edges, top_edges);
        writeln!(writer, "\n{}", "=".repeat(80))?;
        writeln!(writer, "CALL GRAPH SUMMARY: {}", entry.binary.display())?;
        writeln!(writer, "{}", "=".repeat(80))?;
        writeln!(writer, "Functions traced: {}", entry.functions.len())?;
        writeln!(writer, "Anomalies:        {}", entry.session.anomalies.len())?;
        writeln!(writer, "{}", stats.summary())?;
    }
    writer.flush()
}

/// Ask the debugger for the functions of a binary
///
/// **Public** - the symbol table reader
pub fn list_functions(
    runner: &dyn ScriptRunner,
    binary: &Path,
) -> Result<Vec<FunctionSite>, TraceError> {
    let listing = runner.run_script(binary, &build_listing_script())?;
    Ok(parse_functions(&listing)?)
}

/// Render one DOT graph per traced binary
///
/// A single binary gets an anonymous `digraph`; several binaries get graphs
/// named after their paths so they can be told apart.
pub fn render_graphs(traced: &[TracedBinary]) -> String {
    if let [single] = traced {
        return render_dot(&single.session.edges, &DotConfig::new());
    }

    traced
        .iter()
        .map(|entry| {
            let config = DotConfig::new().with_name(entry.binary.display().to_string());
            render_dot(&entry.session.edges, &config)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate trace arguments
///
/// **Public** - can be called before execute_trace for early validation
pub fn validate_args(args: &TraceArgs) -> Result<()> {
    if args.binaries.is_empty() {
        anyhow::bail!("At least one binary must be given");
    }

    for binary in &args.binaries {
        if !binary.is_file() {
            anyhow::bail!("Binary not found: {}", binary.display());
        }
    }

    if let Some(path) = &args.output {
        validate_path(path).context("Invalid call graph output path")?;
    }

    if let Some(path) = &args.json_report {
        validate_path(path).context("Invalid trace report path")?;
    }

    if args.gdb.program.trim().is_empty() {
        anyhow::bail!("Debugger program cannot be empty");
    }

    if args.top_edges == 0 {
        anyhow::bail!("top_edges must be greater than 0");
    }

    Ok(())
}
