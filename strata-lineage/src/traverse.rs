//! Lineage traversal
//!
//! Walks a built graph from a start node and collects every reachable
//! node, the edges used, and the distinct paths taken. The walk is an
//! iterative depth-first search with an explicit stack, so pathological
//! inputs cannot overflow the call stack.
//!
//! Cycle protection is scoped to the current path: a node already on the
//! active path is never re-entered, while reaching the same node again
//! from a different branch stays allowed. Diamond-shaped lineage therefore
//! yields one path per distinct route instead of collapsing into one.
//! Full path enumeration is exponential on dense diamonds; that is the
//! accepted cost of reporting every route.

use crate::graph::{LineageEdge, LineageGraph};
use crate::{Error, Result};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;
use std::collections::HashSet;
use strata_core::LineageNode;

/// Result of a single-direction traversal.
///
/// Nodes are deduplicated and include the start node; each unique edge
/// appears once even when several paths use it. Paths are ordered node-id
/// sequences from the start node to each terminal reached, and the same
/// node or edge may appear in many paths.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalResult {
    /// Id the traversal started from
    pub start_id: String,

    /// Every node reached, start node first
    pub nodes: Vec<LineageNode>,

    /// Every edge traversed, each at most once
    pub edges: Vec<LineageEdge>,

    /// Distinct paths from the start node to each terminal
    pub paths: Vec<Vec<String>>,
}

/// Result of a both-directions traversal.
///
/// Nodes and edges are the union over both directions; the two path lists
/// stay separate and labeled.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullLineage {
    /// Id the traversal started from
    pub start_id: String,

    /// Union of nodes reached in either direction
    pub nodes: Vec<LineageNode>,

    /// Union of edges traversed in either direction
    pub edges: Vec<LineageEdge>,

    /// Paths walking incoming edges (ancestors)
    pub upstream_paths: Vec<Vec<String>>,

    /// Paths walking outgoing edges (descendants)
    pub downstream_paths: Vec<Vec<String>>,
}

/// Collect all ancestors of `start_id` by walking incoming edges.
///
/// Returns [`Error::NodeNotFound`] when `start_id` is not in the graph.
pub fn trace_upstream(graph: &LineageGraph, start_id: &str) -> Result<TraversalResult> {
    walk(graph, start_id, Direction::Incoming)
}

/// Collect all descendants of `start_id` by walking outgoing edges.
///
/// Returns [`Error::NodeNotFound`] when `start_id` is not in the graph.
pub fn trace_downstream(graph: &LineageGraph, start_id: &str) -> Result<TraversalResult> {
    walk(graph, start_id, Direction::Outgoing)
}

/// Trace both directions from `start_id` and merge the results.
pub fn trace_full_lineage(graph: &LineageGraph, start_id: &str) -> Result<FullLineage> {
    let upstream = walk(graph, start_id, Direction::Incoming)?;
    let downstream = walk(graph, start_id, Direction::Outgoing)?;

    let mut nodes = upstream.nodes;
    let mut node_ids: HashSet<String> = nodes.iter().map(|n| n.id.clone()).collect();
    for node in downstream.nodes {
        if node_ids.insert(node.id.clone()) {
            nodes.push(node);
        }
    }

    let mut edges = upstream.edges;
    let mut edge_pairs: HashSet<(String, String)> = edges
        .iter()
        .map(|e| (e.source_id.clone(), e.target_id.clone()))
        .collect();
    for edge in downstream.edges {
        if edge_pairs.insert((edge.source_id.clone(), edge.target_id.clone())) {
            edges.push(edge);
        }
    }

    Ok(FullLineage {
        start_id: upstream.start_id,
        nodes,
        edges,
        upstream_paths: upstream.paths,
        downstream_paths: downstream.paths,
    })
}

/// One depth-first frame: the admissible branches out of a node and how
/// far through them the walk has gotten.
struct Frame {
    branches: Vec<(EdgeIndex, NodeIndex)>,
    next: usize,
    expanded: bool,
}

fn walk(graph: &LineageGraph, start_id: &str, direction: Direction) -> Result<TraversalResult> {
    let start = graph
        .index_of(start_id)
        .ok_or_else(|| Error::NodeNotFound(start_id.to_string()))?;
    let inner = graph.inner();

    let mut visited_order: Vec<NodeIndex> = vec![start];
    let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
    let mut edge_order: Vec<EdgeIndex> = Vec::new();
    let mut edges_seen: HashSet<EdgeIndex> = HashSet::new();
    let mut paths: Vec<Vec<String>> = Vec::new();

    let mut path: Vec<NodeIndex> = vec![start];
    let mut on_path: HashSet<NodeIndex> = HashSet::from([start]);

    let mut stack: Vec<Frame> = vec![Frame {
        branches: branches_of(inner, start, direction),
        next: 0,
        expanded: false,
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.next < frame.branches.len() {
            let (edge_idx, neighbor) = frame.branches[frame.next];
            frame.next += 1;

            // Never re-enter a node on the active path; this bounds cycles
            // (including self-loops) without collapsing diamonds.
            if on_path.contains(&neighbor) {
                continue;
            }
            frame.expanded = true;

            if edges_seen.insert(edge_idx) {
                edge_order.push(edge_idx);
            }
            if visited.insert(neighbor) {
                visited_order.push(neighbor);
            }

            path.push(neighbor);
            on_path.insert(neighbor);
            stack.push(Frame {
                branches: branches_of(inner, neighbor, direction),
                next: 0,
                expanded: false,
            });
        } else {
            // No admissible branch was ever followed from here, so the
            // active path terminates at this node.
            if !frame.expanded {
                paths.push(path.iter().map(|&idx| inner[idx].id.clone()).collect());
            }
            stack.pop();
            if let Some(node) = path.pop() {
                on_path.remove(&node);
            }
        }
    }

    Ok(TraversalResult {
        start_id: start_id.to_string(),
        nodes: visited_order.iter().map(|&idx| inner[idx].clone()).collect(),
        edges: edge_order.iter().map(|&idx| inner[idx].clone()).collect(),
        paths,
    })
}

/// Adjacent edges of a node in walk direction, neighbor on the far end.
fn branches_of(
    graph: &DiGraph<LineageNode, LineageEdge>,
    node: NodeIndex,
    direction: Direction,
) -> Vec<(EdgeIndex, NodeIndex)> {
    let mut branches: Vec<(EdgeIndex, NodeIndex)> = graph
        .edges_directed(node, direction)
        .map(|edge| {
            let neighbor = match direction {
                Direction::Outgoing => edge.target(),
                Direction::Incoming => edge.source(),
            };
            (edge.id(), neighbor)
        })
        .collect();
    // petgraph yields the newest edge first; reverse so the walk follows
    // record insertion order and path output stays deterministic.
    branches.reverse();
    branches
}
