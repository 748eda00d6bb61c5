//! # gp-td-tools
//!
//! Library for generating Teradata migration artifacts from Greenplum
//! catalog metadata:
//!
//! - **DDL translation**: read a table's column metadata and emit a
//!   Teradata `CREATE TABLE` statement.
//! - **Mapping workbooks**: populate a source-to-target mapping
//!   spreadsheet template with per-column annotations.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gp_td_tools::{CatalogPool, Config, PrimaryIndex};
//!
//! #[tokio::main]
//! async fn main() -> gp_td_tools::Result<()> {
//!     let config = Config::from_env()?;
//!     let pool = CatalogPool::connect(&config.catalog).await?;
//!     let columns = pool.ddl_columns("sales", "orders").await?;
//!     let ddl = gp_td_tools::ddl::create_table(
//!         "sales",
//!         "orders",
//!         &columns,
//!         &PrimaryIndex::default(),
//!     );
//!     println!("{}", ddl);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod ddl;
pub mod error;
pub mod mapping;
pub mod schema;
pub mod typemap;

// Re-exports for convenient access
pub use catalog::CatalogPool;
pub use config::{CatalogConfig, Config};
pub use error::{Result, ToolError};
pub use schema::{ColumnDescriptor, PrimaryIndex};
