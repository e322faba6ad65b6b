//! Data model for traced call graphs.
//!
//! These types flow from the debugger output parsers to the graph renderer
//! and the JSON report. All of them serialize with serde.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A function with a known source location, used as a breakpoint target
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FunctionSite {
    /// Source file the function is defined in
    pub file: String,

    /// Line of the definition
    pub line: u32,

    /// Signature as printed by the debugger
    pub signature: String,
}

impl FunctionSite {
    /// Breakpoint location in `file:line` form
    pub fn location(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

/// One frame of a backtrace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    /// Frame number; 0 is the innermost frame
    pub number: u32,

    /// Function name (may be qualified or compiler-generated)
    pub function: String,

    /// Raw argument text, unparsed
    pub arguments: String,

    /// Source file, when debug info is available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Source line, when debug info is available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Shared object the frame lives in, for frames without debug info
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
}

/// One observed caller -> callee relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Calling frame; `None` when the caller could not be determined
    pub caller: Option<StackFrame>,

    /// Function that was executing at the breakpoint (frame #0)
    pub callee: StackFrame,

    /// Source text of the callee line about to execute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callee_source_line: Option<String>,
}

/// Category of a recoverable irregularity in a breakpoint hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Hit reported without any backtrace frame
    NoFrames,
    /// A `#` line did not have the shape of a stack frame
    UnparsableFrame,
    /// A frame expected to be #0 carried another number
    UnexpectedFrameNumber,
    /// More than one hit was reported in a single segment
    MergedHits,
    /// A #0 frame was followed by another #0, so its caller is unknown
    CallerShadowed,
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoFrames => "no frames",
            Self::UnparsableFrame => "unparsable frame",
            Self::UnexpectedFrameNumber => "unexpected frame number",
            Self::MergedHits => "merged hits",
            Self::CallerShadowed => "caller shadowed",
        };
        f.write_str(name)
    }
}

/// A recoverable irregularity found while parsing a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Breakpoint number from the hit header, if it could be read
    pub breakpoint: Option<u32>,

    /// Location of the breakpoint, resolved from the function list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    pub kind: AnomalyKind,

    pub detail: String,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.breakpoint, &self.location) {
            (Some(nr), Some(loc)) => write!(f, "breakpoint {} ({}): ", nr, loc)?,
            (Some(nr), None) => write!(f, "breakpoint {}: ", nr)?,
            _ => {}
        }
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

/// Result of parsing one debugger transcript
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSession {
    /// Edges in the order the transcript reports them
    pub edges: Vec<Edge>,

    /// Irregularities that caused hits to be skipped or flagged
    pub anomalies: Vec<Anomaly>,

    /// Number of breakpoint hits seen
    pub hits: usize,
}

/// Top-level trace report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Binary that was traced
    pub binary: String,

    /// Number of functions a breakpoint was set on
    pub functions: usize,

    /// Observed edges, in execution order
    pub edges: Vec<Edge>,

    /// Anomalies recorded while parsing the transcript
    pub anomalies: Vec<Anomaly>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}
