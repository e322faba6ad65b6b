//! gdb-callgraph
//!
//! Call graph reconstruction for compiled programs. The program is run under
//! GDB with a breakpoint on every function that has debug info; each hit
//! prints a two-frame backtrace, and the transcript is parsed into
//! caller -> callee edges rendered as Graphviz DOT.
//!
//! This crate provides the core implementation for the `callgraph` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install gdb-callgraph
//! callgraph -o callgraph.dot ./a.out
//! dot -Tsvg callgraph.dot > callgraph.svg
//! ```

pub mod aggregator;
pub mod commands;
pub mod debugger;
pub mod graph;
pub mod output;
pub mod parser;
pub mod utils;
