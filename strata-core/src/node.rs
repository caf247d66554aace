//! Node identity and traversal direction
//!
//! A graph node is identified by the tuple (application id, schema, table,
//! column-or-null). The tuple renders to a deterministic string id, so ids
//! are stable across rebuilds from the same input and a UI can feed a
//! previously displayed id straight back into a new traversal request.

use crate::record::LineageEdgeRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator joining identity parts into a node id.
const ID_SEPARATOR: &str = "::";

/// Placeholder for the absent column of a table-level node.
const NO_COLUMN: &str = "-";

/// The identity tuple of a lineage graph node.
///
/// Two records naming the same tuple always resolve to the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub application_id: i64,
    pub schema: String,
    pub table: String,
    pub column: Option<String>,
}

impl NodeKey {
    /// Create a key from its parts.
    pub fn new(
        application_id: i64,
        schema: impl Into<String>,
        table: impl Into<String>,
        column: Option<String>,
    ) -> Self {
        Self {
            application_id,
            schema: schema.into(),
            table: table.into(),
            column,
        }
    }

    /// Identity of the source endpoint of a record.
    pub fn source(record: &LineageEdgeRecord) -> Self {
        Self {
            application_id: record.source_application_id,
            schema: record.source_schema.clone(),
            table: record.source_table.clone(),
            column: record.source_column.clone(),
        }
    }

    /// Identity of the target endpoint of a record.
    pub fn target(record: &LineageEdgeRecord) -> Self {
        Self {
            application_id: record.target_application_id,
            schema: record.target_schema.clone(),
            table: record.target_table.clone(),
            column: record.target_column.clone(),
        }
    }

    /// Canonical string id for this identity tuple.
    pub fn to_id(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}",
            self.application_id,
            self.schema,
            self.table,
            self.column.as_deref().unwrap_or(NO_COLUMN),
            sep = ID_SEPARATOR,
        )
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_id())
    }
}

/// A node in the lineage graph: identity plus display metadata.
///
/// Immutable once built; the graph owns node lifecycles and nothing mutates
/// a node after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageNode {
    /// Canonical id, as produced by [`NodeKey::to_id`]
    pub id: String,

    /// Owning application
    pub application_id: i64,

    /// Schema name
    pub schema: String,

    /// Table name
    pub table: String,

    /// Column name, absent for table-level nodes
    pub column: Option<String>,

    /// Processing-layer label (display metadata, not graph structure)
    pub layer: String,
}

impl LineageNode {
    /// Materialize a node from its identity key and layer label.
    pub fn from_key(key: &NodeKey, layer: impl Into<String>) -> Self {
        Self {
            id: key.to_id(),
            application_id: key.application_id,
            schema: key.schema.clone(),
            table: key.table.clone(),
            column: key.column.clone(),
            layer: layer.into(),
        }
    }
}

/// Traversal direction requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ancestors: sources, transitively
    Upstream,
    /// Descendants: targets, transitively
    Downstream,
    /// Both directions from the same start node
    Both,
}

impl Direction {
    /// String form used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Upstream => "upstream",
            Direction::Downstream => "downstream",
            Direction::Both => "both",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upstream" => Ok(Direction::Upstream),
            "downstream" => Ok(Direction::Downstream),
            "both" => Ok(Direction::Both),
            other => Err(crate::Error::InvalidDirection(other.to_string())),
        }
    }
}
