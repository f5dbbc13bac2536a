use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{ReportStatusDto, SubmitReportDto, SubmitReportResponseDto};
use crate::features::reports::services::{IntakeService, ReportService};
use crate::shared::types::ApiResponse;

/// State for the public report handlers
#[derive(Clone)]
pub struct ReportState {
    pub intake_service: Arc<IntakeService>,
    pub report_service: Arc<ReportService>,
}

/// Submit an anonymous report
///
/// Public endpoint. The response carries the tracking id, which is the only
/// way to follow up on the report later.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = SubmitReportDto,
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<SubmitReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Could not allocate a unique tracking id")
    ),
    tag = "reports"
)]
pub async fn submit_report(
    State(state): State<ReportState>,
    AppJson(dto): AppJson<SubmitReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<SubmitReportResponseDto>>)> {
    let tracking_id = state.intake_service.submit(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(SubmitReportResponseDto { tracking_id }),
            Some("Report submitted. Keep your tracking id for future reference.".to_string()),
            None,
        )),
    ))
}

/// Check the status of a report by tracking id (public)
#[utoipa::path(
    get,
    path = "/api/reports/{tracking_id}/status",
    params(
        ("tracking_id" = String, Path, description = "Tracking id returned at submission")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportStatusDto>),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn get_report_status(
    State(state): State<ReportState>,
    Path(tracking_id): Path<String>,
) -> Result<Json<ApiResponse<ReportStatusDto>>> {
    let report = state.report_service.lookup(&tracking_id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}
