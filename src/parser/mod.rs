//! Debugger output parsing and data model.
//!
//! This module handles:
//! - Parsing the function listing into breakpoint targets
//! - Parsing single backtrace lines into stack frames
//! - Reconstructing caller/callee edges from a session transcript

pub mod frame;
pub mod schema;
pub mod session;
pub mod symbols;

// Re-export main types
pub use frame::parse_frame;
pub use schema::{
    Anomaly, AnomalyKind, Edge, FunctionSite, ParsedSession, StackFrame, TraceReport,
};
pub use session::parse_session;
pub use symbols::parse_functions;
