use crate::error::{GraphError, Result};
use crate::patterns::detect_patterns;
use crate::render::{count_files, render_multi, render_single};
use crate::topology::Topology;
use crate::types::GraphResultEntry;
use serde::Serialize;
use symgraph_protocol::estimate_tokens;

/// Rendered connection map plus its accounting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionGraphResult {
    pub text: String,
    pub result_count: usize,
    pub file_count: usize,
    pub token_count: usize,
}

/// Render the connection graph for a result set.
///
/// The layout is picked on result count alone: one result gets the compact
/// card, several get topology and pattern analysis. An empty result set is a
/// caller bug and fails.
pub fn generate_connection_graph(
    query: &str,
    results: &[GraphResultEntry],
) -> Result<ConnectionGraphResult> {
    let text = match results {
        [] => return Err(GraphError::EmptyResultSet),
        [single] => render_single(single),
        _ => {
            let topology = Topology::analyze(results);
            let patterns = detect_patterns(results, &topology);
            render_multi(query, results, &topology, &patterns)
        }
    };

    Ok(ConnectionGraphResult {
        token_count: estimate_tokens(&text),
        result_count: results.len(),
        file_count: count_files(results),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{call, entry};

    #[test]
    fn empty_results_fail() {
        let err = generate_connection_graph("symbol = x", &[]).unwrap_err();
        assert!(matches!(err, GraphError::EmptyResultSet));
    }

    #[test]
    fn single_result_has_no_graph_sections() {
        let results = vec![entry("a.ts", "solo", vec![call("b.ts", "dep")])];
        let graph = generate_connection_graph("symbol = solo", &results).unwrap();
        assert!(!graph.text.contains("Graph:"));
        assert!(!graph.text.contains("Patterns:"));
        assert_eq!(graph.result_count, 1);
        assert_eq!(graph.file_count, 1);
        assert_eq!(graph.token_count, estimate_tokens(&graph.text));
    }

    #[test]
    fn rendering_is_idempotent() {
        let results = vec![
            entry("a.ts", "a", vec![call("c.ts", "x"), call("d.ts", "y")]),
            entry("b.ts", "b", vec![call("c.ts", "x"), call("a.ts", "a")]),
            entry("c.ts", "c", vec![call("d.ts", "y").calls(vec![call("c.ts", "x")])]),
        ];
        let first = generate_connection_graph("symbol = q", &results).unwrap();
        let second = generate_connection_graph("symbol = q", &results).unwrap();
        assert_eq!(first, second);
        assert!(first.text.contains("Patterns:"));
    }
}
