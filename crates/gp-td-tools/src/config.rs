//! Service configuration, loaded once at startup.
//!
//! All settings come from `GP_*` environment variables. The resulting
//! [`Config`] is an explicit value passed to collaborators; nothing in
//! this crate reads the environment after startup.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Result, ToolError};

/// Default Greenplum coordinator port.
pub const DEFAULT_CATALOG_PORT: u16 = 7830;

/// Default location of the mapping workbook template.
pub const DEFAULT_TEMPLATE_PATH: &str = "mapping.xlsx";

const DEFAULT_POOL_SIZE: usize = 4;

/// Greenplum catalog connection settings.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Database host.
    pub host: String,

    /// Database port (default: 7830).
    pub port: u16,

    /// Database name.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    pub password: String,

    /// Maximum pooled connections.
    pub pool_size: usize,
}

/// Root configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog connection settings.
    pub catalog: CatalogConfig,

    /// Path to the mapping workbook template.
    pub template_path: PathBuf,
}

impl Config {
    /// Build configuration from the environment.
    ///
    /// `GP_HOST`, `GP_DB`, `GP_USER` and `GP_PASSWORD` are required;
    /// `GP_PORT`, `GP_POOL_SIZE` and `MAPPING_TEMPLATE` fall back to
    /// defaults when unset.
    pub fn from_env() -> Result<Self> {
        let catalog = CatalogConfig {
            host: require_var("GP_HOST")?,
            port: parse_var("GP_PORT", DEFAULT_CATALOG_PORT)?,
            database: require_var("GP_DB")?,
            user: require_var("GP_USER")?,
            password: require_var("GP_PASSWORD")?,
            pool_size: parse_var("GP_POOL_SIZE", DEFAULT_POOL_SIZE)?,
        };

        let template_path = env::var("MAPPING_TEMPLATE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TEMPLATE_PATH));

        let config = Self {
            catalog,
            template_path,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.host.trim().is_empty() {
            return Err(ToolError::Config("GP_HOST must not be empty".to_string()));
        }
        if self.catalog.database.trim().is_empty() {
            return Err(ToolError::Config("GP_DB must not be empty".to_string()));
        }
        if self.catalog.user.trim().is_empty() {
            return Err(ToolError::Config("GP_USER must not be empty".to_string()));
        }
        if self.catalog.pool_size == 0 {
            return Err(ToolError::Config(
                "GP_POOL_SIZE must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn require_var(name: &str) -> Result<String> {
    env::var(name)
        .map_err(|_| ToolError::Config(format!("missing required environment variable {}", name)))
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ToolError::Config(format!("invalid value for {}: {}", name, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config() -> Config {
        Config {
            catalog: CatalogConfig {
                host: "gp-coordinator".to_string(),
                port: DEFAULT_CATALOG_PORT,
                database: "warehouse".to_string(),
                user: "etl".to_string(),
                password: "secret".to_string(),
                pool_size: DEFAULT_POOL_SIZE,
            },
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(make_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let mut config = make_config();
        config.catalog.host = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GP_HOST"));
    }

    #[test]
    fn test_validate_rejects_zero_pool() {
        let mut config = make_config();
        config.catalog.pool_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_reads_catalog_settings() {
        env::set_var("GP_HOST", "gp.internal");
        env::set_var("GP_DB", "warehouse");
        env::set_var("GP_USER", "etl");
        env::set_var("GP_PASSWORD", "secret");
        env::remove_var("GP_PORT");
        env::remove_var("MAPPING_TEMPLATE");

        let config = Config::from_env().unwrap();
        assert_eq!(config.catalog.host, "gp.internal");
        assert_eq!(config.catalog.port, DEFAULT_CATALOG_PORT);
        assert_eq!(config.template_path, PathBuf::from(DEFAULT_TEMPLATE_PATH));
    }
}
