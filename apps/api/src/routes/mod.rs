pub mod health;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::documents::handlers as documents;
use crate::orders::handlers as orders;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/statuses", get(orders::handle_status_catalogue))
        // Orders
        .route("/api/v1/orders", get(orders::handle_list_orders))
        .route("/api/v1/orders/:id", get(orders::handle_get_order))
        .route("/api/v1/orders/:id/items", get(orders::handle_order_items))
        .route(
            "/api/v1/orders/:id/status",
            patch(orders::handle_change_status),
        )
        // Printable documents
        .route(
            "/api/v1/orders/:id/documents/:kind",
            get(documents::handle_get_document).post(documents::handle_post_document),
        )
        .with_state(state)
}
