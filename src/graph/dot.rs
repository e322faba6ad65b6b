//! Graphviz DOT rendering of traced call graphs.
//!
//! Each edge with a known caller becomes a directed edge statement, labelled
//! with the callee's arguments when there are any. Edges without a caller
//! become standalone node statements. Repeated edges are emitted as often as
//! they were observed; Graphviz merges identical statements when drawing.

use crate::parser::schema::Edge;
use log::info;

/// DOT rendering configuration
#[derive(Debug, Clone, Default)]
pub struct DotConfig {
    /// Graph name, rendered as `digraph "<name>" {`
    pub name: Option<String>,
}

impl DotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Render edges as a DOT digraph
///
/// **Public** - main entry point for graph serialization
///
/// # Example
/// ```text
/// digraph {
///     "main" -> "foo" [label="(n=23)"]
///     "_start"
/// }
/// ```
pub fn render_dot(edges: &[Edge], config: &DotConfig) -> String {
    let mut out = String::new();

    match &config.name {
        Some(name) => out.push_str(&format!("digraph {} {{\n", quote(name))),
        None => out.push_str("digraph {\n"),
    }

    for edge in edges {
        let callee = &edge.callee;
        let Some(caller) = &edge.caller else {
            // Caller information missing
            out.push_str(&format!("\t{}\n", quote(&callee.function)));
            continue;
        };

        if callee.arguments.is_empty() {
            out.push_str(&format!(
                "\t{} -> {}\n",
                quote(&caller.function),
                quote(&callee.function)
            ));
        } else {
            let label = format!("({})", callee.arguments);
            out.push_str(&format!(
                "\t{} -> {} [label={}]\n",
                quote(&caller.function),
                quote(&callee.function),
                quote(&label)
            ));
        }
    }

    out.push('}');

    info!("Rendered call graph with {} edges ({} bytes)", edges.len(), out.len());
    out
}

/// Quote a string as a DOT identifier
fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\x{:02x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::StackFrame;
    use pretty_assertions::assert_eq;

    fn frame(number: u32, function: &str, arguments: &str) -> StackFrame {
        StackFrame {
            number,
            function: function.to_string(),
            arguments: arguments.to_string(),
            file: None,
            line: None,
            library: None,
        }
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("main"), "\"main\"");
        assert_eq!(quote("s=\"a\\b\""), "\"s=\\\"a\\\\b\\\"\"");
        assert_eq!(quote("a\nb"), "\"a\\nb\"");
    }

    #[test]
    fn test_render_mixed_edges() {
        let edges = vec![
            Edge {
                caller: None,
                callee: frame(0, "main", "argc=1"),
                callee_source_line: None,
            },
            Edge {
                caller: Some(frame(1, "main", "argc=1")),
                callee: frame(0, "foo", "n=23"),
                callee_source_line: None,
            },
            Edge {
                caller: Some(frame(1, "foo", "n=23")),
                callee: frame(0, "tick", ""),
                callee_source_line: None,
            },
        ];

        let dot = render_dot(&edges, &DotConfig::new());
        assert_eq!(
            dot,
            "digraph {\n\t\"main\"\n\t\"main\" -> \"foo\" [label=\"(n=23)\"]\n\t\"foo\" -> \"tick\"\n}"
        );
    }

    #[test]
    fn test_render_named_graph() {
        let dot = render_dot(&[], &DotConfig::new().with_name("./test"));
        assert_eq!(dot, "digraph \"./test\" {\n}");
    }
}
