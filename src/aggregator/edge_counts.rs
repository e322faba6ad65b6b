//! Collapse the observed edge multiset into per-pair hit counts.
//!
//! The trace keeps every hit (a loop calling `foo` a thousand times yields a
//! thousand edges). For reporting we count hits per caller -> callee pair.

use crate::parser::schema::Edge;
use log::debug;
use std::collections::HashMap;

/// Number of hits of one caller -> callee pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeCount {
    /// Caller function name; `None` for hits without a known caller
    pub caller: Option<String>,

    /// Callee function name
    pub callee: String,

    /// Times the pair was observed
    pub hits: usize,
}

impl EdgeCount {
    /// `caller -> callee`, or `? -> callee` without a caller
    pub fn to_line(&self) -> String {
        format!(
            "{} -> {}",
            self.caller.as_deref().unwrap_or("?"),
            self.callee
        )
    }
}

/// Count hits per caller -> callee pair
///
/// **Public** - main entry point for edge aggregation
///
/// # Returns
/// One entry per distinct pair, most frequent first; ties are ordered by
/// first appearance in the trace so the result is deterministic
pub fn count_edges(edges: &[Edge]) -> Vec<EdgeCount> {
    // (caller, callee) -> (hits, first index)
    let mut counts: HashMap<(Option<&str>, &str), (usize, usize)> = HashMap::new();

    for (index, edge) in edges.iter().enumerate() {
        let key = (
            edge.caller.as_ref().map(|c| c.function.as_str()),
            edge.callee.function.as_str(),
        );
        counts.entry(key).or_insert((0, index)).0 += 1;
    }

    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|(_, (hits_a, first_a)), (_, (hits_b, first_b))| {
        hits_b.cmp(hits_a).then(first_a.cmp(first_b))
    });

    debug!("Collapsed {} edges into {} distinct pairs", edges.len(), sorted.len());

    sorted
        .into_iter()
        .map(|((caller, callee), (hits, _))| EdgeCount {
            caller: caller.map(str::to_string),
            callee: callee.to_string(),
            hits,
        })
        .collect()
}
