use crate::traverse::walk_outgoing;
use crate::types::{GraphLine, GraphResultEntry, NodeRole, TopologyEdge, TopologyNode};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};
use symgraph_protocol::SymbolKey;

/// Deduplicated call graph spanning every result's outgoing tree
pub struct Topology {
    /// Directed graph; parallel edges are kept (one per traversed call)
    graph: DiGraph<TopologyNode, TopologyEdge>,

    /// Symbol key -> NodeIndex mapping for fast lookup
    node_index: HashMap<SymbolKey, NodeIndex>,

    /// Render records for the Graph section
    lines: Vec<GraphLine>,
}

impl Topology {
    /// Build the topology for a result set.
    ///
    /// Result nodes are seeded first, in result order, so every result owns a
    /// node whether or not it calls anything.
    pub fn analyze(results: &[GraphResultEntry]) -> Self {
        let mut topology = Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
            lines: Vec::new(),
        };

        let mut result_keys: HashMap<SymbolKey, usize> = HashMap::new();
        for (pos, entry) in results.iter().enumerate() {
            let key = entry.key();
            let index = *result_keys.entry(key.clone()).or_insert(pos + 1);
            topology.ensure_node(&key, NodeRole::Result { index });
        }

        // Phase 1: walk each root, recording which roots reach which non-results.
        // Results sharing a key are one node, so they count as one root.
        let mut referenced_by: HashMap<SymbolKey, BTreeSet<usize>> = HashMap::new();
        for entry in results {
            let root = result_keys[&entry.key()];
            walk_outgoing(&entry.key(), &entry.metadata.outgoing_calls, &mut |step| {
                let key = step.call.target.key();
                let role = result_keys
                    .get(&key)
                    .map_or(NodeRole::Dependency, |&index| NodeRole::Result { index });
                let from = topology.ensure_node(step.caller, NodeRole::Dependency);
                let to = topology.ensure_node(&key, role);
                topology.graph.add_edge(
                    from,
                    to,
                    TopologyEdge {
                        root,
                        truncation: step.truncation(),
                    },
                );
                if !result_keys.contains_key(&key) {
                    referenced_by.entry(key).or_default().insert(root);
                }
            });
        }

        // Phase 2: promote dependencies reached from two or more roots
        for (key, roots) in &referenced_by {
            if roots.len() < 2 {
                continue;
            }
            if let Some(&idx) = topology.node_index.get(key) {
                topology.graph[idx].role = NodeRole::SharedDependency;
            }
        }

        // Phase 3: render lines
        topology.lines = topology.build_lines(results, &result_keys);

        log::debug!(
            "Built topology: {} nodes, {} edges, {} lines",
            topology.node_count(),
            topology.edge_count(),
            topology.lines.len()
        );

        topology
    }

    fn ensure_node(&mut self, key: &SymbolKey, role: NodeRole) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(key) {
            return idx;
        }
        let idx = self.graph.add_node(TopologyNode {
            name: key.name.clone(),
            file_path: key.file_path.clone(),
            role,
        });
        self.node_index.insert(key.clone(), idx);
        idx
    }

    fn build_lines(
        &self,
        results: &[GraphResultEntry],
        result_keys: &HashMap<SymbolKey, usize>,
    ) -> Vec<GraphLine> {
        let mut lines = Vec::new();
        for (pos, entry) in results.iter().enumerate() {
            let key = entry.key();
            let root = result_keys[&key];
            let calls = &entry.metadata.outgoing_calls;

            // A leaf result already drawn inside another tree is not repeated.
            if calls.is_empty() && self.is_reached_from_other_root(&key, root) {
                continue;
            }

            lines.push(GraphLine {
                depth: 0,
                name: key.name.clone(),
                file_path: key.file_path.clone(),
                role: NodeRole::Result { index: pos + 1 },
                truncation: None,
            });

            walk_outgoing(&key, calls, &mut |step| {
                let target = &step.call.target;
                lines.push(GraphLine {
                    depth: step.depth,
                    name: target.name.clone(),
                    file_path: target.file_path.clone(),
                    role: self.role_of(&target.key()),
                    truncation: step.truncation(),
                });
            });
        }
        lines
    }

    fn is_reached_from_other_root(&self, key: &SymbolKey, root: usize) -> bool {
        self.node_index.get(key).is_some_and(|&idx| {
            self.graph
                .edges_directed(idx, Direction::Incoming)
                .any(|edge| edge.weight().root != root)
        })
    }

    fn role_of(&self, key: &SymbolKey) -> NodeRole {
        self.node(key).map_or(NodeRole::Dependency, |node| node.role)
    }

    /// Find node by symbol key
    pub fn node(&self, key: &SymbolKey) -> Option<&TopologyNode> {
        self.node_index
            .get(key)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// All nodes in creation order (results first)
    pub fn nodes(&self) -> impl Iterator<Item = &TopologyNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// All edges in traversal order as `(from, to, edge)`
    pub fn edges(&self) -> impl Iterator<Item = (&TopologyNode, &TopologyNode, &TopologyEdge)> {
        self.graph
            .edge_references()
            .map(|edge| (&self.graph[edge.source()], &self.graph[edge.target()], edge.weight()))
    }

    /// Result roots whose walks produced an edge into `key`
    pub fn roots_reaching(&self, key: &SymbolKey) -> BTreeSet<usize> {
        self.node_index
            .get(key)
            .map(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .map(|edge| edge.weight().root)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn lines(&self) -> &[GraphLine] {
        &self.lines
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
