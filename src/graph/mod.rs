//! Call graph serialization.
//!
//! This module converts the ordered edge list into Graphviz DOT text.

pub mod dot;

// Re-export main types
pub use dot::{render_dot, DotConfig};
