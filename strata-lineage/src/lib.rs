//! # Strata Lineage
//!
//! Builds an in-memory directed graph from flat lineage edge records and
//! answers upstream, downstream, and full-lineage traversal queries over it.
//!
//! The graph is request-scoped: the caller hands over a filtered record
//! list, [`build_graph`] turns it into a [`LineageGraph`], and the trace
//! functions walk it. Nothing here performs I/O or holds state across
//! requests.

pub mod builder;
pub mod graph;
pub mod service;
pub mod traverse;

// Re-export commonly used types
pub use builder::{build_graph, BuildReport};
pub use graph::{LineageEdge, LineageGraph};
pub use service::{trace_records, trace_request, LineageTracer, TraceResponse};
pub use traverse::{
    trace_downstream, trace_full_lineage, trace_upstream, FullLineage, TraversalResult,
};

/// Result type for lineage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for lineage operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The traversal start node is not in the graph. Surfaced explicitly so
    /// a stale id is distinguishable from a node that exists but has no
    /// lineage.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Unrecognized direction value, rejected at the request boundary
    /// before any graph work.
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),
}
