use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::{IntakeService, ReportService};

/// Create public routes for the reports feature
///
/// Admin access to the registry lives in the admin feature
pub fn routes(intake_service: Arc<IntakeService>, report_service: Arc<ReportService>) -> Router {
    let state = ReportState {
        intake_service,
        report_service,
    };

    Router::new()
        .route("/api/reports", post(handlers::submit_report))
        .route(
            "/api/reports/{tracking_id}/status",
            get(handlers::get_report_status),
        )
        .with_state(state)
}
