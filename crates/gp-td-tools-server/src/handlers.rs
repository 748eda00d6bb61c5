//! Request handlers for the DDL and mapping endpoints.
//!
//! Both artifact paths fetch catalog metadata through the pooled
//! client, run the pure translation/annotation core, and return the
//! artifact as an in-memory attachment.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use gp_td_tools::mapping::workbook::MappingWorkbook;
use gp_td_tools::mapping::{self, ClassificationSets, MappingInfo};
use gp_td_tools::{ddl, PrimaryIndex, ToolError};

use crate::state::AppState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Body of `POST /ddl/download`.
#[derive(Debug, Deserialize)]
pub struct DdlRequest {
    pub schema: String,
    pub table_name: String,

    /// Override for the generated PRIMARY INDEX name.
    #[serde(default)]
    pub index_name: Option<String>,

    /// Comma-separated override for the PRIMARY INDEX key columns.
    #[serde(default)]
    pub index_cols: Option<String>,
}

impl DdlRequest {
    fn primary_index(&self) -> PrimaryIndex {
        let default = PrimaryIndex::default();
        let name = self.index_name.clone().unwrap_or(default.name);
        let columns = self
            .index_cols
            .as_deref()
            .map(PrimaryIndex::parse_columns)
            .filter(|cols| !cols.is_empty())
            .unwrap_or(default.columns);
        PrimaryIndex { name, columns }
    }
}

/// Body of `POST /mappings/generate/`.
#[derive(Debug, Deserialize)]
pub struct MappingRequest {
    pub schema: String,
    pub table: String,
    pub author: String,
    pub load_strategy: String,
    pub ilm_strategy: String,
    #[serde(default)]
    pub pi_cols: String,
    #[serde(default)]
    pub pk_cols: String,
    #[serde(default)]
    pub fk_cols: String,
    #[serde(default)]
    pub compression_cols: String,
    #[serde(default)]
    pub unicode_cols: String,
    #[serde(default)]
    pub pii_cols: String,
}

impl MappingRequest {
    fn classification_sets(&self) -> ClassificationSets {
        ClassificationSets {
            primary_index: mapping::parse_column_list(&self.pi_cols),
            primary_key: mapping::parse_column_list(&self.pk_cols),
            foreign_key: mapping::parse_column_list(&self.fk_cols),
            compression: mapping::parse_column_list(&self.compression_cols),
            unicode: mapping::parse_column_list(&self.unicode_cols),
            pii: mapping::parse_column_list(&self.pii_cols),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub pool_size: usize,
    pub pool_available: usize,
}

/// Error payload with a stable machine-readable code.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Wrapper mapping [`ToolError`] kinds onto HTTP responses.
pub struct ApiError(ToolError);

impl From<ToolError> for ApiError {
    fn from(err: ToolError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
            code: self.0.code().to_string(),
        });
        (status, body).into_response()
    }
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let status = state.pool.status();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        pool_size: status.size,
        pool_available: status.available,
    })
}

pub async fn download_ddl(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DdlRequest>,
) -> Result<Response, ApiError> {
    if !state.pool.table_exists(&req.schema, &req.table_name).await? {
        return Err(ToolError::TableNotFound {
            schema: req.schema.clone(),
            table: req.table_name.clone(),
        }
        .into());
    }

    let columns = state.pool.ddl_columns(&req.schema, &req.table_name).await?;
    let statement = ddl::create_table(
        &req.schema,
        &req.table_name,
        &columns,
        &req.primary_index(),
    );

    info!(
        "Generated DDL for {}.{} ({} columns)",
        req.schema,
        req.table_name,
        columns.len()
    );

    let filename = format!("{}.{}.sql", req.schema, req.table_name);
    Ok(attachment(&filename, "application/sql", statement.into_bytes()))
}

pub async fn generate_mapping(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MappingRequest>,
) -> Result<Response, ApiError> {
    if !state.pool.table_exists(&req.schema, &req.table).await? {
        return Err(ToolError::TableNotFound {
            schema: req.schema.clone(),
            table: req.table.clone(),
        }
        .into());
    }

    let columns = state.pool.mapping_columns(&req.schema, &req.table).await?;
    let rows = mapping::annotate(&req.schema, &req.table, &columns, &req.classification_sets());
    let mapping_info = MappingInfo {
        author: req.author.clone(),
        load_strategy: req.load_strategy.clone(),
        ilm_strategy: req.ilm_strategy.clone(),
    };

    let mut workbook = MappingWorkbook::load(&state.config.template_path)?;
    workbook.populate(&rows, &mapping_info)?;
    let bytes = workbook.into_bytes()?;

    info!(
        "Generated mapping workbook for {}.{} ({} rows)",
        req.schema,
        req.table,
        rows.len()
    );

    let filename = format!(
        "{}_T_{}.xlsx",
        req.schema.to_uppercase(),
        req.table.to_uppercase()
    );
    Ok(attachment(&filename, XLSX_CONTENT_TYPE, bytes))
}

fn attachment(filename: &str, content_type: &'static str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ddl_request_defaults_to_legacy_index() {
        let req: DdlRequest =
            serde_json::from_str(r#"{"schema": "sales", "table_name": "orders"}"#).unwrap();
        let index = req.primary_index();
        assert_eq!(index.name, "NUPI_PPID_SUPPLR_CAB_DTL");
        assert_eq!(index.columns, vec!["PPID", "UNIQUE_CMPNT_NM"]);
    }

    #[test]
    fn test_ddl_request_index_override() {
        let req: DdlRequest = serde_json::from_str(
            r#"{"schema": "sales", "table_name": "orders",
                "index_name": "NUPI_ORDER", "index_cols": "ORDER_ID, SITE_ID"}"#,
        )
        .unwrap();
        let index = req.primary_index();
        assert_eq!(index.name, "NUPI_ORDER");
        assert_eq!(index.columns, vec!["ORDER_ID", "SITE_ID"]);
    }

    #[test]
    fn test_ddl_request_empty_cols_fall_back() {
        let req: DdlRequest = serde_json::from_str(
            r#"{"schema": "s", "table_name": "t", "index_cols": " , "}"#,
        )
        .unwrap();
        assert_eq!(req.primary_index().columns, vec!["PPID", "UNIQUE_CMPNT_NM"]);
    }

    #[test]
    fn test_mapping_request_optional_sets_default_empty() {
        let req: MappingRequest = serde_json::from_str(
            r#"{"schema": "sales", "table": "orders", "author": "J. Doe",
                "load_strategy": "Incremental", "ilm_strategy": "7 years",
                "pii_cols": "ssn,dob"}"#,
        )
        .unwrap();
        let sets = req.classification_sets();
        assert!(sets.primary_index.is_empty());
        assert!(sets.primary_key.is_empty());
        assert_eq!(sets.pii.len(), 2);
        assert!(sets.pii.contains("ssn"));
    }
}
