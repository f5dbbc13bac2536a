use axum::{routing::get, Router};

use crate::features::categories::handlers;

/// Create routes for the categories feature
///
/// Note: This feature is public (no authentication required)
pub fn routes() -> Router {
    Router::new().route("/api/categories", get(handlers::list_categories))
}
