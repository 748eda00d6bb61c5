//! Catalog metadata types shared by the DDL and mapping pipelines.

use serde::{Deserialize, Serialize};

/// One row of `information_schema.columns` for a table, in catalog
/// ordinal order.
///
/// Zero-valued lengths, precisions and scales are normalised to `None`
/// at fetch time; the translation rules treat both the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name, unique within the table.
    pub name: String,

    /// Source type name. The DDL pipeline reads `data_type`
    /// (e.g. "character varying"); the mapping pipeline reads
    /// `udt_name` (e.g. "varchar").
    pub native_type: String,

    /// Maximum length for character types.
    pub char_length: Option<u32>,

    /// Numeric precision.
    pub numeric_precision: Option<u32>,

    /// Numeric scale.
    pub numeric_scale: Option<u32>,

    /// Whether the column allows NULL.
    pub nullable: bool,
}

/// PRIMARY INDEX clause for generated Teradata DDL.
///
/// The defaults reproduce the index the tool has always emitted for its
/// single target table; callers migrating any other table should supply
/// their own key columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryIndex {
    /// Index name.
    pub name: String,

    /// Key column names, in clause order.
    pub columns: Vec<String>,
}

impl PrimaryIndex {
    /// Create a primary index clause with explicit key columns.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Parse a comma-separated key-column list, preserving order and
    /// dropping empty entries.
    pub fn parse_columns(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for PrimaryIndex {
    fn default() -> Self {
        Self {
            name: "NUPI_PPID_SUPPLR_CAB_DTL".to_string(),
            columns: vec!["PPID".to_string(), "UNIQUE_CMPNT_NM".to_string()],
        }
    }
}
