//! Type mapping between Greenplum and Teradata.
//!
//! Two rule tables live here and they are intentionally independent:
//! [`ddl_type`] is keyed on `information_schema` `data_type` names and
//! feeds the CREATE TABLE generator, while [`mapping_type`] is keyed on
//! `udt_name` and feeds the mapping workbook. The tables diverge for
//! the same logical type (e.g. `numeric(10,2)` becomes `DECIMAL(10,2)`
//! in DDL but `DECIMAL(18,0)` on the sheet); each consumer's output is
//! fixed by its downstream contract, so the tables must not be unified.

/// Map a Greenplum `data_type` to a Teradata type expression for DDL.
///
/// Rules apply in order, first match wins; unknown types pass through
/// uppercased and unchanged.
pub fn ddl_type(
    native_type: &str,
    char_length: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
) -> String {
    match native_type {
        "character varying" | "text" => format!("VARCHAR({})", char_length.unwrap_or(255)),
        "character" => format!("CHAR({})", char_length.unwrap_or(1)),
        "integer" => "INTEGER".to_string(),
        "bigint" => "BIGINT".to_string(),
        "smallint" => "SMALLINT".to_string(),
        "numeric" => match (precision, scale) {
            (Some(p), Some(s)) => format!("DECIMAL({},{})", p, s),
            _ => "DECIMAL(18,2)".to_string(),
        },
        t if t.starts_with("timestamp") => "TIMESTAMP(6)".to_string(),
        "boolean" => "BYTEINT".to_string(),
        "date" => "DATE".to_string(),
        other => other.to_uppercase(),
    }
}

/// Format a Greenplum `udt_name` for the mapping workbook's datatype
/// columns.
///
/// Callers uppercase the result before writing it to the sheet; unknown
/// udt names pass through unchanged.
pub fn mapping_type(udt_name: &str, char_length: Option<u32>, precision: Option<u32>) -> String {
    let udt = udt_name.to_lowercase();
    match udt.as_str() {
        "varchar" => match char_length {
            Some(len) => format!("{}({})", udt, len),
            None => udt,
        },
        "char" | "bpchar" => match char_length {
            Some(len) => format!("CHAR({})", len),
            None => udt,
        },
        "timestamp" => format!("{}(6)", udt),
        "numeric" | "decimal" => {
            if precision.is_some() {
                "DECIMAL(18,0)".to_string()
            } else {
                udt
            }
        }
        "int4" => "INTEGER".to_string(),
        "int2" => "SMALLINT".to_string(),
        "int8" => "BIGINT".to_string(),
        "timestamptz" => "TIMESTAMP(6) WITH TIME ZONE".to_string(),
        _ => udt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ddl_character_types() {
        assert_eq!(ddl_type("character varying", Some(50), None, None), "VARCHAR(50)");
        assert_eq!(ddl_type("character varying", None, None, None), "VARCHAR(255)");
        assert_eq!(ddl_type("text", None, None, None), "VARCHAR(255)");
        assert_eq!(ddl_type("character", Some(10), None, None), "CHAR(10)");
        assert_eq!(ddl_type("character", None, None, None), "CHAR(1)");
    }

    #[test]
    fn test_ddl_integer_types() {
        assert_eq!(ddl_type("integer", None, None, None), "INTEGER");
        assert_eq!(ddl_type("bigint", None, None, None), "BIGINT");
        assert_eq!(ddl_type("smallint", None, None, None), "SMALLINT");
    }

    #[test]
    fn test_ddl_numeric_types() {
        assert_eq!(ddl_type("numeric", None, Some(10), Some(2)), "DECIMAL(10,2)");
        assert_eq!(ddl_type("numeric", None, None, None), "DECIMAL(18,2)");
        // Scale alone is not enough; the fallback applies.
        assert_eq!(ddl_type("numeric", None, Some(10), None), "DECIMAL(18,2)");
        assert_eq!(ddl_type("numeric", None, None, Some(2)), "DECIMAL(18,2)");
    }

    #[test]
    fn test_ddl_temporal_and_boolean_types() {
        assert_eq!(ddl_type("timestamp without time zone", None, None, None), "TIMESTAMP(6)");
        assert_eq!(ddl_type("timestamp with time zone", None, None, None), "TIMESTAMP(6)");
        assert_eq!(ddl_type("boolean", None, None, None), "BYTEINT");
        assert_eq!(ddl_type("date", None, None, None), "DATE");
    }

    #[test]
    fn test_ddl_unknown_type_passes_through_uppercased() {
        assert_eq!(ddl_type("uuid", None, None, None), "UUID");
        assert_eq!(ddl_type("double precision", None, None, None), "DOUBLE PRECISION");
        assert_eq!(ddl_type("bytea", Some(16), Some(4), Some(2)), "BYTEA");
    }

    #[test]
    fn test_mapping_character_types() {
        assert_eq!(mapping_type("varchar", Some(50), None), "varchar(50)");
        assert_eq!(mapping_type("varchar", None, None), "varchar");
        assert_eq!(mapping_type("char", Some(3), None), "CHAR(3)");
        assert_eq!(mapping_type("bpchar", Some(3), None), "CHAR(3)");
        assert_eq!(mapping_type("bpchar", None, None), "bpchar");
    }

    #[test]
    fn test_mapping_numeric_types() {
        assert_eq!(mapping_type("numeric", None, Some(10)), "DECIMAL(18,0)");
        assert_eq!(mapping_type("decimal", None, Some(10)), "DECIMAL(18,0)");
        assert_eq!(mapping_type("numeric", None, None), "numeric");
    }

    #[test]
    fn test_mapping_integer_and_temporal_types() {
        assert_eq!(mapping_type("int4", None, None), "INTEGER");
        assert_eq!(mapping_type("int2", None, None), "SMALLINT");
        assert_eq!(mapping_type("int8", None, None), "BIGINT");
        assert_eq!(mapping_type("timestamp", None, None), "timestamp(6)");
        assert_eq!(mapping_type("timestamptz", None, None), "TIMESTAMP(6) WITH TIME ZONE");
    }

    #[test]
    fn test_mapping_unknown_type_passes_through() {
        assert_eq!(mapping_type("uuid", None, None), "uuid");
        assert_eq!(mapping_type("Bool", None, None), "bool");
    }

    #[test]
    fn test_tables_diverge_for_numeric() {
        // The two consumers disagree on numerics; this divergence is
        // part of each output contract.
        assert_eq!(ddl_type("numeric", None, Some(10), Some(2)), "DECIMAL(10,2)");
        assert_eq!(mapping_type("numeric", None, Some(10)), "DECIMAL(18,0)");
    }
}
