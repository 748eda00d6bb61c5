//! Error types for artifact generation.

use thiserror::Error;

/// Main error type for DDL and mapping generation.
///
/// The variants form a closed error-kind set; [`ToolError::status_code`]
/// maps each kind to a distinct HTTP status so clients can handle
/// failures programmatically instead of parsing free text.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Configuration error (missing environment variable, bad value).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested table is absent from the catalog.
    #[error("Table {schema}.{table} not found.")]
    TableNotFound { schema: String, table: String },

    /// Catalog connection or query error.
    #[error("Catalog error: {0}")]
    Catalog(#[from] tokio_postgres::Error),

    /// Connection pool error with context.
    #[error("Pool error: {message}\n  Context: {context}")]
    Pool { message: String, context: String },

    /// Workbook template missing, unreadable, or its headers do not
    /// match what the mapping emitter expects.
    #[error("Template error: {0}")]
    Template(String),

    /// Artifact serialization failure.
    #[error("Artifact write failed: {0}")]
    Write(String),

    /// IO error (file operations).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    /// Create a Pool error with context about where it occurred.
    pub fn pool(message: impl std::fmt::Display, context: impl Into<String>) -> Self {
        ToolError::Pool {
            message: message.to_string(),
            context: context.into(),
        }
    }

    /// HTTP status code for this error kind.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Config(_) => 500,
            Self::TableNotFound { .. } => 404,
            Self::Catalog(_) | Self::Pool { .. } => 503,
            Self::Template(_) => 500,
            Self::Write(_) | Self::Io(_) => 500,
        }
    }

    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::TableNotFound { .. } => "NOT_FOUND",
            Self::Catalog(_) | Self::Pool { .. } => "CATALOG_UNAVAILABLE",
            Self::Template(_) => "TEMPLATE_MISMATCH",
            Self::Write(_) | Self::Io(_) => "WRITE_FAILURE",
        }
    }
}

/// Result type alias for artifact generation.
pub type Result<T> = std::result::Result<T, ToolError>;
