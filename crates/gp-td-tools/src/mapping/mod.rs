//! Source-to-target mapping annotation.
//!
//! Pure rules that turn catalog column metadata into fully-annotated
//! mapping-sheet rows. Workbook mechanics live in [`workbook`].

pub mod workbook;

use std::collections::HashSet;

use crate::schema::ColumnDescriptor;
use crate::typemap;

/// Literal written into all four source fields of a synthetic column.
pub const ETL_DERIVED: &str = "ETL Derived";

/// Fixed value of the Security Classification column.
pub const SECURITY_CLASSIFICATION: &str = "internal";

/// Name fragments of audit/control columns injected by the ETL layer.
/// Containment (not equality) marks a column as ETL-derived.
const ETL_DERIVED_FRAGMENTS: &[&str] = &[
    "op_type",
    "pos",
    "op_ts",
    "src_sys_nm",
    "kfk_ins_dtsz",
    "dw_row_hash_val",
    "dw_src_site_id",
    "dw_ins_dtsz",
    "dw_upd_dtsz",
    "dw_ld_grp_val",
    "dw_etl_sess_nm",
];

/// Whether a column is synthesised by the ETL layer rather than pulled
/// from the source table. Case-insensitive substring match.
pub fn is_etl_derived(column_name: &str) -> bool {
    let lower = column_name.to_lowercase();
    ETL_DERIVED_FRAGMENTS
        .iter()
        .any(|fragment| lower.contains(fragment))
}

/// Transform comment for a column.
///
/// Exact match on the lowercased full name; this keyword set overlaps
/// the ETL-derived fragment list but is a separate rule table (e.g. a
/// column merely *containing* `op_ts` is ETL-derived yet falls through
/// to "Straight Pull" here).
pub fn transform_comment(column_name: &str) -> &'static str {
    match column_name.to_lowercase().as_str() {
        "op_type" => "I/U/D",
        "pos" => "Position",
        "op_ts" => "Timestamp",
        "src_sys_nm" => "GTM",
        "kfk_ins_dtsz" => "kafka timestamp",
        "dw_row_hash_val" => "12345",
        "dw_src_site_id" => "4101",
        "dw_ins_dtsz" | "dw_upd_dtsz" => "current_timestamp",
        "dw_ld_grp_val" => "123456",
        "dw_etl_sess_nm" => "ETL/SS/GPSS",
        _ => "Straight Pull",
    }
}

/// Caller-supplied column-name sets behind the six Y/N flags.
/// Membership is exact string equality; unknown names are inert.
#[derive(Debug, Clone, Default)]
pub struct ClassificationSets {
    pub primary_index: HashSet<String>,
    pub primary_key: HashSet<String>,
    pub foreign_key: HashSet<String>,
    pub compression: HashSet<String>,
    pub unicode: HashSet<String>,
    pub pii: HashSet<String>,
}

/// Parse a comma-separated column-name list into a set.
/// Empty or absent input yields the empty set.
pub fn parse_column_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn flag(set: &HashSet<String>, column_name: &str) -> &'static str {
    if set.contains(column_name) {
        "Y"
    } else {
        "N"
    }
}

/// Header metadata for the "Mapping Information" sheet.
#[derive(Debug, Clone)]
pub struct MappingInfo {
    pub author: String,
    pub load_strategy: String,
    pub ilm_strategy: String,
}

/// One fully-annotated row of the "Data Mapping" sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    /// 1-based catalog ordinal.
    pub seq: u32,
    pub target_column: String,
    pub target_datatype: String,
    pub nullable: &'static str,
    pub source_column: String,
    pub source_datatype: String,
    pub source_schema: String,
    pub source_table: String,
    pub transform_comment: &'static str,
    pub description: String,
    pub primary_index: &'static str,
    pub primary_key: &'static str,
    pub foreign_key: &'static str,
    pub compression: &'static str,
    pub unicode: &'static str,
    pub pii: &'static str,
}

/// Annotate every column of a table, preserving catalog order.
pub fn annotate(
    schema: &str,
    table: &str,
    columns: &[ColumnDescriptor],
    sets: &ClassificationSets,
) -> Vec<MappingRow> {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| annotate_column(i as u32 + 1, schema, table, column, sets))
        .collect()
}

fn annotate_column(
    seq: u32,
    schema: &str,
    table: &str,
    column: &ColumnDescriptor,
    sets: &ClassificationSets,
) -> MappingRow {
    let datatype = typemap::mapping_type(
        &column.native_type,
        column.char_length,
        column.numeric_precision,
    )
    .to_uppercase();

    let (source_column, source_datatype, source_schema, source_table) =
        if is_etl_derived(&column.name) {
            (
                ETL_DERIVED.to_string(),
                ETL_DERIVED.to_string(),
                ETL_DERIVED.to_string(),
                ETL_DERIVED.to_string(),
            )
        } else {
            // Assumed identity mapping from the source table.
            (
                column.name.clone(),
                datatype.clone(),
                schema.to_string(),
                table.to_string(),
            )
        };

    MappingRow {
        seq,
        target_column: column.name.clone(),
        target_datatype: datatype,
        nullable: if column.nullable { "Y" } else { "N" },
        source_column,
        source_datatype,
        source_schema,
        source_table,
        transform_comment: transform_comment(&column.name),
        description: column.name.replace('_', " "),
        primary_index: flag(&sets.primary_index, &column.name),
        primary_key: flag(&sets.primary_key, &column.name),
        foreign_key: flag(&sets.foreign_key, &column.name),
        compression: flag(&sets.compression, &column.name),
        unicode: flag(&sets.unicode, &column.name),
        pii: flag(&sets.pii, &column.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, udt: &str, nullable: bool) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            native_type: udt.to_string(),
            char_length: None,
            numeric_precision: None,
            numeric_scale: None,
            nullable,
        }
    }

    #[test]
    fn test_etl_derived_is_substring_and_case_insensitive() {
        assert!(is_etl_derived("op_ts"));
        assert!(is_etl_derived("gg_op_ts_utc"));
        assert!(is_etl_derived("DW_ROW_HASH_VAL"));
        assert!(!is_etl_derived("order_ts"));
        assert!(!is_etl_derived("customer_id"));
    }

    #[test]
    fn test_transform_comment_is_exact_match() {
        assert_eq!(transform_comment("op_type"), "I/U/D");
        assert_eq!(transform_comment("OP_TS"), "Timestamp");
        assert_eq!(transform_comment("dw_ins_dtsz"), "current_timestamp");
        assert_eq!(transform_comment("dw_upd_dtsz"), "current_timestamp");
        assert_eq!(transform_comment("kfk_ins_dtsz"), "kafka timestamp");
        assert_eq!(transform_comment("dw_etl_sess_nm"), "ETL/SS/GPSS");
        // Substring containment is not enough for a comment.
        assert_eq!(transform_comment("gg_op_ts_utc"), "Straight Pull");
        assert_eq!(transform_comment("customer_id"), "Straight Pull");
    }

    #[test]
    fn test_parse_column_list() {
        let set = parse_column_list("ppid, unique_cmpnt_nm ,,ssn ");
        assert_eq!(set.len(), 3);
        assert!(set.contains("ppid"));
        assert!(set.contains("unique_cmpnt_nm"));
        assert!(set.contains("ssn"));
        assert!(parse_column_list("").is_empty());
    }

    #[test]
    fn test_flags_require_exact_membership() {
        let sets = ClassificationSets {
            pii: parse_column_list("ssn"),
            ..Default::default()
        };
        let rows = annotate(
            "hr",
            "people",
            &[column("ssn", "varchar", true), column("ssn_hash", "varchar", true)],
            &sets,
        );
        assert_eq!(rows[0].pii, "Y");
        // Substring match must not raise the flag.
        assert_eq!(rows[1].pii, "N");
    }

    #[test]
    fn test_etl_derived_row_sets_all_four_source_fields() {
        let rows = annotate(
            "sales",
            "orders",
            &[column("op_ts", "timestamp", true)],
            &ClassificationSets::default(),
        );
        let row = &rows[0];
        assert_eq!(row.source_column, ETL_DERIVED);
        assert_eq!(row.source_datatype, ETL_DERIVED);
        assert_eq!(row.source_schema, ETL_DERIVED);
        assert_eq!(row.source_table, ETL_DERIVED);
        assert_eq!(row.transform_comment, "Timestamp");
        assert_eq!(row.target_datatype, "TIMESTAMP(6)");
    }

    #[test]
    fn test_straight_pull_row_mirrors_target() {
        let rows = annotate(
            "sales",
            "orders",
            &[column("customer_nm", "varchar", false)],
            &ClassificationSets::default(),
        );
        let row = &rows[0];
        assert_eq!(row.source_column, "customer_nm");
        assert_eq!(row.source_datatype, "VARCHAR");
        assert_eq!(row.source_schema, "sales");
        assert_eq!(row.source_table, "orders");
        assert_eq!(row.transform_comment, "Straight Pull");
        assert_eq!(row.nullable, "N");
        assert_eq!(row.description, "customer nm");
    }

    #[test]
    fn test_annotate_preserves_order_and_numbers_from_one() {
        let columns = vec![
            column("zeta", "int4", true),
            column("alpha", "int4", true),
            column("mid", "int4", true),
        ];
        let rows = annotate("s", "t", &columns, &ClassificationSets::default());
        let names: Vec<&str> = rows.iter().map(|r| r.target_column.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        let seqs: Vec<u32> = rows.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
    }
}
