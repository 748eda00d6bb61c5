//! Greenplum catalog introspection.
//!
//! Uses deadpool-postgres for connection pooling. Pooled clients are
//! returned to the pool when dropped, so every query path releases its
//! connection on success and on error alike.

use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Status};
use tokio_postgres::{Config as PgConfig, NoTls};
use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::error::{Result, ToolError};
use crate::schema::ColumnDescriptor;

/// Pooled connection to the Greenplum catalog.
pub struct CatalogPool {
    pool: Pool,
}

impl CatalogPool {
    /// Create a pool from configuration and smoke-test one connection.
    pub async fn connect(config: &CatalogConfig) -> Result<Self> {
        let mut pg_config = PgConfig::new();
        pg_config.host(&config.host);
        pg_config.port(config.port);
        pg_config.dbname(&config.database);
        pg_config.user(&config.user);
        pg_config.password(&config.password);

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, NoTls, mgr_config);
        let pool = Pool::builder(mgr)
            .max_size(config.pool_size)
            .build()
            .map_err(|e| ToolError::pool(e, "creating catalog pool"))?;

        // Test connection
        let client = pool
            .get()
            .await
            .map_err(|e| ToolError::pool(e, "testing catalog connection"))?;
        client.simple_query("SELECT 1").await?;

        info!(
            "Connected to Greenplum catalog: {}:{}/{}",
            config.host, config.port, config.database
        );

        Ok(Self { pool })
    }

    /// Current pool counters, for health reporting.
    pub fn status(&self) -> Status {
        self.pool.status()
    }

    /// Check whether a table exists in the catalog.
    pub async fn table_exists(&self, schema: &str, table: &str) -> Result<bool> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| ToolError::pool(e, "getting catalog connection"))?;

        let sql = r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = $1 AND table_name = $2
            )
        "#;

        let row = client.query_one(sql, &[&schema, &table]).await?;
        Ok(row.get::<_, bool>(0))
    }

    /// Fetch column metadata for the DDL pipeline (`data_type` names).
    pub async fn ddl_columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        self.columns(schema, table, "data_type").await
    }

    /// Fetch column metadata for the mapping pipeline (`udt_name` names).
    pub async fn mapping_columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        self.columns(schema, table, "udt_name").await
    }

    async fn columns(
        &self,
        schema: &str,
        table: &str,
        type_column: &str,
    ) -> Result<Vec<ColumnDescriptor>> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| ToolError::pool(e, "getting catalog connection"))?;

        // type_column is one of two trusted literals, never user input.
        let sql = format!(
            r#"
            SELECT
                column_name,
                {}::text,
                character_maximum_length::int4,
                numeric_precision::int4,
                numeric_scale::int4,
                CASE WHEN is_nullable = 'YES' THEN true ELSE false END
            FROM information_schema.columns
            WHERE table_schema = $1 AND table_name = $2
            ORDER BY ordinal_position
            "#,
            type_column
        );

        let rows = client.query(&sql, &[&schema, &table]).await?;

        let columns: Vec<ColumnDescriptor> = rows
            .iter()
            .map(|row| ColumnDescriptor {
                name: row.get(0),
                native_type: row.get(1),
                char_length: positive(row.get(2)),
                numeric_precision: positive(row.get(3)),
                numeric_scale: positive(row.get(4)),
                nullable: row.get(5),
            })
            .collect();

        debug!("Loaded {} columns for {}.{}", columns.len(), schema, table);
        Ok(columns)
    }
}

/// Normalise catalog dimension values: NULL and zero both mean "absent".
fn positive(value: Option<i32>) -> Option<u32> {
    value.filter(|&v| v > 0).map(|v| v as u32)
}
