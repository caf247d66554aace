//! Request boundary for lineage traversal
//!
//! The dashboard's request handler hands over the already-filtered record
//! list together with the node id and direction coming from the UI. This
//! module builds a request-scoped graph, dispatches on direction, and
//! shapes the response for serialization. Graphs are never shared between
//! requests; callers that want to reuse one within a request can hold a
//! [`LineageTracer`] over it.

use crate::builder::build_graph;
use crate::graph::{LineageEdge, LineageGraph};
use crate::traverse::{trace_downstream, trace_full_lineage, trace_upstream};
use crate::{Error, Result};
use serde::Serialize;
use strata_core::{Direction, LineageEdgeRecord, LineageNode};

/// Traversal response in the shape the UI consumes.
///
/// For upstream/downstream requests `paths` is set; for `both`, the two
/// labeled path lists are set instead. Unset lists are omitted from the
/// serialized output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceResponse {
    /// Id the traversal started from
    pub start_id: String,

    /// Direction that was requested
    pub direction: Direction,

    /// Reached nodes with full display attributes
    pub nodes: Vec<LineageNode>,

    /// Deduplicated edges used by the traversal
    pub edges: Vec<LineageEdge>,

    /// Paths for a single-direction request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<Vec<String>>>,

    /// Ancestor paths for a `both` request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_paths: Option<Vec<Vec<String>>>,

    /// Descendant paths for a `both` request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_paths: Option<Vec<Vec<String>>>,

    /// Malformed records the graph build left out
    pub skipped_records: usize,
}

/// Traversal entry point over an already built graph.
pub struct LineageTracer<'a> {
    graph: &'a LineageGraph,
}

impl<'a> LineageTracer<'a> {
    /// Create a tracer for the given graph.
    pub fn new(graph: &'a LineageGraph) -> Self {
        Self { graph }
    }

    /// Trace from `start_id` in the requested direction.
    pub fn trace(&self, start_id: &str, direction: Direction) -> Result<TraceResponse> {
        match direction {
            Direction::Upstream | Direction::Downstream => {
                let result = match direction {
                    Direction::Upstream => trace_upstream(self.graph, start_id)?,
                    _ => trace_downstream(self.graph, start_id)?,
                };
                Ok(TraceResponse {
                    start_id: result.start_id,
                    direction,
                    nodes: result.nodes,
                    edges: result.edges,
                    paths: Some(result.paths),
                    upstream_paths: None,
                    downstream_paths: None,
                    skipped_records: 0,
                })
            }
            Direction::Both => {
                let full = trace_full_lineage(self.graph, start_id)?;
                Ok(TraceResponse {
                    start_id: full.start_id,
                    direction,
                    nodes: full.nodes,
                    edges: full.edges,
                    paths: None,
                    upstream_paths: Some(full.upstream_paths),
                    downstream_paths: Some(full.downstream_paths),
                    skipped_records: 0,
                })
            }
        }
    }
}

/// Build a request-scoped graph from `records` and trace from `start_id`.
///
/// The number of malformed records the build skipped is surfaced on the
/// response so the handler can count or log them.
pub fn trace_records(
    records: &[LineageEdgeRecord],
    start_id: &str,
    direction: Direction,
) -> Result<TraceResponse> {
    let (graph, report) = build_graph(records);
    let mut response = LineageTracer::new(&graph).trace(start_id, direction)?;
    response.skipped_records = report.skipped;
    Ok(response)
}

/// Like [`trace_records`], but with the direction still in wire form.
///
/// An unrecognized direction is rejected before any graph work begins.
pub fn trace_request(
    records: &[LineageEdgeRecord],
    start_id: &str,
    direction: &str,
) -> Result<TraceResponse> {
    let direction: Direction = direction
        .parse()
        .map_err(|_| Error::InvalidDirection(direction.to_string()))?;
    trace_records(records, start_id, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::NodeKey;

    fn records() -> Vec<LineageEdgeRecord> {
        vec![
            LineageEdgeRecord::new(1, "staging", "orders", "bronze", 2, "trusted", "orders_clean", "silver")
                .with_source_column("id")
                .with_target_column("id"),
            LineageEdgeRecord::new(2, "trusted", "orders_clean", "silver", 3, "gold", "orders_gold", "gold")
                .with_source_column("id"),
        ]
    }

    fn clean_id() -> String {
        NodeKey::new(2, "trusted", "orders_clean", Some("id".to_string())).to_id()
    }

    #[test]
    fn test_downstream_response_shape() {
        let response = trace_records(&records(), &clean_id(), Direction::Downstream).unwrap();

        assert_eq!(response.direction, Direction::Downstream);
        assert_eq!(response.nodes.len(), 2);
        assert_eq!(response.edges.len(), 1);
        assert!(response.paths.is_some());
        assert!(response.upstream_paths.is_none());
        assert!(response.downstream_paths.is_none());
    }

    #[test]
    fn test_both_response_keeps_labeled_paths() {
        let response = trace_records(&records(), &clean_id(), Direction::Both).unwrap();

        assert_eq!(response.nodes.len(), 3);
        assert_eq!(response.edges.len(), 2);
        assert!(response.paths.is_none());
        assert_eq!(response.upstream_paths.as_ref().unwrap().len(), 1);
        assert_eq!(response.downstream_paths.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_skipped_records_surfaced() {
        let mut all = records();
        let mut bad = all[0].clone();
        bad.target_schema = "  ".to_string();
        all.push(bad);

        let response = trace_records(&all, &clean_id(), Direction::Downstream).unwrap();
        assert_eq!(response.skipped_records, 1);
    }

    #[test]
    fn test_invalid_direction_rejected_at_boundary() {
        let err = trace_request(&records(), &clean_id(), "sideways").unwrap_err();
        assert!(matches!(err, Error::InvalidDirection(ref s) if s == "sideways"));
    }

    #[test]
    fn test_valid_wire_direction() {
        let response = trace_request(&records(), &clean_id(), "upstream").unwrap();
        assert_eq!(response.direction, Direction::Upstream);
        assert_eq!(response.nodes.len(), 2);
    }

    #[test]
    fn test_stale_node_id_not_found() {
        let err = trace_records(&records(), "4::old::gone::-", Direction::Downstream).unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(_)));
    }

    #[test]
    fn test_response_serialization_omits_unset_paths() {
        let response = trace_records(&records(), &clean_id(), Direction::Downstream).unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["direction"], "downstream");
        assert_eq!(json["startId"], clean_id());
        assert!(json.get("paths").is_some());
        assert!(json.get("upstreamPaths").is_none());
        assert!(json.get("downstreamPaths").is_none());
        assert_eq!(json["skippedRecords"], 0);

        let both = trace_records(&records(), &clean_id(), Direction::Both).unwrap();
        let json = serde_json::to_value(&both).unwrap();
        assert!(json.get("paths").is_none());
        assert!(json.get("upstreamPaths").is_some());
        assert!(json.get("downstreamPaths").is_some());
    }
}
