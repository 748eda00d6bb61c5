//! Teradata CREATE TABLE generation.
//!
//! The statement shape is fixed boilerplate for the target warehouse:
//! MULTISET with FALLBACK, no journaling, default checksum and
//! mergeblockratio, TD_MAP1. Only the table identity, the column
//! clause and the PRIMARY INDEX clause vary.

use crate::schema::{ColumnDescriptor, PrimaryIndex};
use crate::typemap;

/// Render one column definition line.
///
/// Every column carries `CHARACTER SET LATIN NOT CASESPECIFIC`, then
/// `NOT NULL` when the catalog marks it non-nullable.
pub fn column_definition(column: &ColumnDescriptor) -> String {
    let mut target = typemap::ddl_type(
        &column.native_type,
        column.char_length,
        column.numeric_precision,
        column.numeric_scale,
    );
    target.push_str(" CHARACTER SET LATIN NOT CASESPECIFIC");
    if !column.nullable {
        target.push_str(" NOT NULL");
    }
    format!("    {} {}", column.name.to_uppercase(), target)
}

/// Assemble a full CREATE TABLE statement.
///
/// Columns are emitted in the order given, which the catalog fetch
/// guarantees to be ordinal order. The target table lands in the
/// `<SCHEMA>_T` database.
pub fn create_table(
    schema: &str,
    table: &str,
    columns: &[ColumnDescriptor],
    index: &PrimaryIndex,
) -> String {
    let mut lines = vec![
        format!(
            "CREATE MULTISET TABLE {}_T.{} ,FALLBACK ,",
            schema.to_uppercase(),
            table.to_uppercase()
        ),
        "    NO BEFORE JOURNAL,".to_string(),
        "    NO AFTER JOURNAL,".to_string(),
        "    CHECKSUM = DEFAULT,".to_string(),
        "    DEFAULT MERGEBLOCKRATIO,".to_string(),
        "    MAP = TD_MAP1".to_string(),
        "    (".to_string(),
    ];

    lines.push(
        columns
            .iter()
            .map(column_definition)
            .collect::<Vec<_>>()
            .join(",\n"),
    );
    lines.push("    )".to_string());
    lines.push(format!(
        "PRIMARY INDEX {} ( {} );",
        index.name,
        index.columns.join(" ,")
    ));

    lines.join("\n")
}
