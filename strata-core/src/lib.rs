//! # Strata Core
//!
//! Shared lineage types for the Strata dashboard: the edge records handed
//! over by the storage layer, node identity, and the traversal direction
//! vocabulary.

pub mod node;
pub mod record;

// Re-export commonly used types
pub use node::{Direction, LineageNode, NodeKey};
pub use record::{LineageEdgeRecord, MalformedRecord};

/// Result type for Strata core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Strata core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    MalformedRecord(#[from] MalformedRecord),

    #[error("Invalid direction: {0} (expected upstream, downstream, or both)")]
    InvalidDirection(String),
}
