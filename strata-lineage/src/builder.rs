//! Graph construction from raw lineage records
//!
//! Pure and synchronous: the builder performs no I/O and has no side
//! effects beyond log output. A fresh graph is built per request from the
//! record list the storage layer already filtered.

use crate::graph::{LineageEdge, LineageGraph};
use strata_core::{LineageEdgeRecord, LineageNode, NodeKey};

/// Counters describing what a build consumed and what it left out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Total records offered to the builder
    pub records_seen: usize,

    /// Records skipped because a required identity field was blank
    pub skipped: usize,

    /// Records dropped because an edge for the same endpoint pair existed
    pub duplicate_edges: usize,
}

/// Build an adjacency-indexed directed graph from a flat record list.
///
/// The input may be empty and carries no ordering guarantee; the resulting
/// node id set and edge endpoint-pair set are identical for any ordering of
/// the same records.
///
/// Malformed records are skipped, counted in the report, and logged — a
/// single bad record never aborts the build. Nodes are deduplicated on
/// their identity tuple with first-occurrence-wins attributes; edges are
/// deduplicated exactly on the (source id, target id) pair. Self-loop
/// records are stored as ordinary edges.
pub fn build_graph(records: &[LineageEdgeRecord]) -> (LineageGraph, BuildReport) {
    let mut graph = LineageGraph::new();
    let mut report = BuildReport::default();

    for record in records {
        report.records_seen += 1;

        if let Err(err) = record.validate() {
            report.skipped += 1;
            tracing::warn!(field = err.field, "Skipping malformed lineage record");
            continue;
        }

        let source = LineageNode::from_key(&NodeKey::source(record), record.source_layer.as_str());
        let target = LineageNode::from_key(&NodeKey::target(record), record.target_layer.as_str());

        let edge = LineageEdge {
            source_id: source.id.clone(),
            target_id: target.id.clone(),
            transformation_type: record.transformation_type.clone(),
        };

        let source_idx = graph.insert_node(source);
        let target_idx = graph.insert_node(target);

        if !graph.insert_edge(source_idx, target_idx, edge) {
            report.duplicate_edges += 1;
        }
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        skipped = report.skipped,
        duplicates = report.duplicate_edges,
        "Lineage graph built"
    );

    (graph, report)
}
