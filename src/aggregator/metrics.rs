//! Summary statistics over a traced call graph.

use super::edge_counts::{count_edges, EdgeCount};
use crate::parser::schema::Edge;
use std::collections::HashSet;

/// Call graph statistics
///
/// **Public** - returned from calculate_stats
#[derive(Debug, Clone, Default)]
pub struct CallGraphStats {
    /// Breakpoint hits that produced an edge
    pub total_hits: usize,

    /// Distinct caller -> callee pairs (unknown callers included)
    pub unique_edges: usize,

    /// Distinct functions seen as caller or callee
    pub functions: usize,

    /// Distinct callees observed without a caller
    pub entry_points: usize,

    /// Most frequent pairs
    pub top_edges: Vec<EdgeCount>,
}

impl CallGraphStats {
    /// Multi-line human readable summary
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} hits, {} distinct edges, {} functions, {} entry points",
            self.total_hits, self.unique_edges, self.functions, self.entry_points
        );
        for (i, edge) in self.top_edges.iter().enumerate() {
            out.push_str(&format!("\n  {}. {} ({} hits)", i + 1, edge.to_line(), edge.hits));
        }
        out
    }
}

/// Calculate statistics for an edge list
///
/// # Arguments
/// * `edges` - Edges in trace order
/// * `top_n` - Number of most frequent pairs to keep
pub fn calculate_stats(edges: &[Edge], top_n: usize) -> CallGraphStats {
    let counts = count_edges(edges);

    let mut functions = HashSet::new();
    let mut entry_points = HashSet::new();
    for edge in edges {
        functions.insert(edge.callee.function.as_str());
        match &edge.caller {
            Some(caller) => {
                functions.insert(caller.function.as_str());
            }
            None => {
                entry_points.insert(edge.callee.function.as_str());
            }
        }
    }

    CallGraphStats {
        total_hits: edges.len(),
        unique_edges: counts.len(),
        functions: functions.len(),
        entry_points: entry_points.len(),
        top_edges: counts.into_iter().take(top_n).collect(),
    }
}
