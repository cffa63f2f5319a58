use std::sync::Arc;

use crate::config::Config;
use crate::store::OrderStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Order/item data access. `PgOrderStore` in production.
    pub store: Arc<dyn OrderStore>,
    pub config: Config,
}
