//! Aggregation of traced edges into counts and statistics.

pub mod edge_counts;
pub mod metrics;

// Re-export main types
pub use edge_counts::{count_edges, EdgeCount};
pub use metrics::{calculate_stats, CallGraphStats};
