//! Lineage graph data structure

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strata_core::LineageNode;

/// Edge in the lineage graph.
///
/// Derived from one or more records resolving to the same
/// (source id, target id) pair; the first record seen wins the metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageEdge {
    /// Id of the source node
    pub source_id: String,

    /// Id of the target node
    pub target_id: String,

    /// Transformation descriptor carried over from the record
    pub transformation_type: Option<String>,
}

/// Directed lineage graph, adjacency-indexed in both directions.
///
/// Built once per request by [`crate::build_graph`] and read-only
/// afterwards; there is no public mutation API. Every edge endpoint is
/// guaranteed to exist in the node map because nodes are inserted before
/// their edges.
pub struct LineageGraph {
    graph: DiGraph<LineageNode, LineageEdge>,
    id_to_node: HashMap<String, NodeIndex>,
}

impl LineageGraph {
    pub(crate) fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            id_to_node: HashMap::new(),
        }
    }

    /// Insert a node, keeping the existing one on id collision
    /// (first occurrence wins node attributes).
    pub(crate) fn insert_node(&mut self, node: LineageNode) -> NodeIndex {
        if let Some(&idx) = self.id_to_node.get(&node.id) {
            return idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.id_to_node.insert(id, idx);
        idx
    }

    /// Insert an edge unless one already connects the same endpoint pair.
    /// Returns false for a suppressed duplicate. Self-loops are stored.
    pub(crate) fn insert_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        edge: LineageEdge,
    ) -> bool {
        if self.graph.find_edge(source, target).is_some() {
            return false;
        }
        self.graph.add_edge(source, target, edge);
        true
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_node.get(id).copied()
    }

    pub(crate) fn inner(&self) -> &DiGraph<LineageNode, LineageEdge> {
        &self.graph
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&LineageNode> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    /// Whether the graph contains a node with this id.
    pub fn contains(&self, id: &str) -> bool {
        self.id_to_node.contains_key(id)
    }

    /// Number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of deduplicated edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &LineageNode> {
        self.graph.node_weights()
    }

    /// Iterate over all edges.
    pub fn edges(&self) -> impl Iterator<Item = &LineageEdge> {
        self.graph.edge_weights()
    }

    /// Direct upstream neighbors (sources) of a node.
    pub fn upstream_neighbors(&self, id: &str) -> Vec<&LineageNode> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Direct downstream neighbors (targets) of a node.
    pub fn downstream_neighbors(&self, id: &str) -> Vec<&LineageNode> {
        self.neighbors(id, Direction::Outgoing)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<&LineageNode> {
        match self.index_of(id) {
            Some(idx) => self
                .graph
                .neighbors_directed(idx, direction)
                .map(|n| &self.graph[n])
                .collect(),
            None => Vec::new(),
        }
    }
}

impl Default for LineageGraph {
    fn default() -> Self {
        Self::new()
    }
}
