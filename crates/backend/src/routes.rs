use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers;
use crate::api::state::AppState;

/// Build the application router.
pub fn configure_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // D402 Sales Insights Dashboard
        .route("/", get(handlers::d402_sales_insights::index))
        .route(
            "/api/filter-data",
            get(handlers::d402_sales_insights::filter_data),
        )
        .with_state(state)
}
