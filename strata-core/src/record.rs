//! Lineage edge records
//!
//! Records are materialized by the dashboard's storage layer from pipeline
//! configurations joined against the data dictionary. Each record asserts
//! that a target table or column is derived from a source table or column.
//! The list arrives already filtered (application, schema, layer, search);
//! this crate only consumes it.

use serde::{Deserialize, Serialize};

/// A single source → target lineage assertion.
///
/// Column fields are optional: a record without columns describes
/// table-level lineage. Field names serialize in camelCase to match the
/// wire shape the dashboard produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageEdgeRecord {
    /// Application that owns the source entity
    pub source_application_id: i64,

    /// Application that owns the target entity
    pub target_application_id: i64,

    /// Schema of the source entity
    pub source_schema: String,

    /// Table of the source entity
    pub source_table: String,

    /// Source column, absent for table-level lineage
    #[serde(default)]
    pub source_column: Option<String>,

    /// Schema of the target entity
    pub target_schema: String,

    /// Table of the target entity
    pub target_table: String,

    /// Target column, absent for table-level lineage
    #[serde(default)]
    pub target_column: Option<String>,

    /// Processing-layer label of the source (e.g. bronze/silver/gold)
    pub source_layer: String,

    /// Processing-layer label of the target
    pub target_layer: String,

    /// Optional descriptor of how source becomes target
    /// (e.g. "direct copy", "aggregation")
    #[serde(default)]
    pub transformation_type: Option<String>,
}

impl LineageEdgeRecord {
    /// Create a table-level record between two endpoints.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_application_id: i64,
        source_schema: impl Into<String>,
        source_table: impl Into<String>,
        source_layer: impl Into<String>,
        target_application_id: i64,
        target_schema: impl Into<String>,
        target_table: impl Into<String>,
        target_layer: impl Into<String>,
    ) -> Self {
        Self {
            source_application_id,
            target_application_id,
            source_schema: source_schema.into(),
            source_table: source_table.into(),
            source_column: None,
            target_schema: target_schema.into(),
            target_table: target_table.into(),
            target_column: None,
            source_layer: source_layer.into(),
            target_layer: target_layer.into(),
            transformation_type: None,
        }
    }

    /// Set the source column, turning the source endpoint column-level.
    pub fn with_source_column(mut self, column: impl Into<String>) -> Self {
        self.source_column = Some(column.into());
        self
    }

    /// Set the target column, turning the target endpoint column-level.
    pub fn with_target_column(mut self, column: impl Into<String>) -> Self {
        self.target_column = Some(column.into());
        self
    }

    /// Attach a transformation descriptor.
    pub fn with_transformation(mut self, transformation: impl Into<String>) -> Self {
        self.transformation_type = Some(transformation.into());
        self
    }

    /// Check that the record carries every required identity field.
    ///
    /// Schema and table must be non-blank on both endpoints; columns and the
    /// transformation descriptor stay optional. A failing record is skipped
    /// by the graph builder, never fatal to a build.
    pub fn validate(&self) -> std::result::Result<(), MalformedRecord> {
        let required = [
            ("sourceSchema", &self.source_schema),
            ("sourceTable", &self.source_table),
            ("targetSchema", &self.target_schema),
            ("targetTable", &self.target_table),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(MalformedRecord { field });
            }
        }

        Ok(())
    }
}

/// A record that cannot participate in a graph build because a required
/// identity field is blank. Recoverable per record: builds skip and count
/// these rather than aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("malformed lineage record: missing {field}")]
pub struct MalformedRecord {
    /// Wire name of the blank field
    pub field: &'static str,
}
