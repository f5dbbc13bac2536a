use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::admin::handlers;
use crate::features::reports::services::ReportService;

/// Create admin routes (all require the admin role)
///
/// Nested under `/api/admin`
pub fn routes(report_service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/reports", get(handlers::list_reports))
        .route("/reports/summary", get(handlers::get_summary))
        .route(
            "/reports/{tracking_id}",
            get(handlers::get_report).patch(handlers::update_report),
        )
        .with_state(report_service)
}
