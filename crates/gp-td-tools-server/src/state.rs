//! Shared state for the service.

use gp_td_tools::{CatalogPool, Config};

/// State shared across handlers.
pub struct AppState {
    pub pool: CatalogPool,
    pub config: Config,
}
