use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::reports::dtos::{
    ReportQueryParams, ReportResponseDto, ReportSummaryDto, UpdateReportDto,
};
use crate::features::reports::models::{ReportChanges, TrackingId};
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Meta};

/// List reports, optionally filtered by status, priority and a search term
#[utoipa::path(
    get,
    path = "/api/admin/reports",
    params(ReportQueryParams),
    responses(
        (status = 200, description = "Matching reports in submission order", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 400, description = "Unknown status or priority"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_reports(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ReportService>>,
    Query(params): Query<ReportQueryParams>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let filter = params.to_filter()?;
    let items: Vec<ReportResponseDto> = service
        .list(&filter)
        .await?
        .into_iter()
        .map(ReportResponseDto::from)
        .collect();
    let total = items.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Report counts for the dashboard cards
#[utoipa::path(
    get,
    path = "/api/admin/reports/summary",
    responses(
        (status = 200, description = "Report counts by status", body = ApiResponse<ReportSummaryDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_summary(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<ReportSummaryDto>>> {
    let summary = service.summary().await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

/// Get a report by tracking id
#[utoipa::path(
    get,
    path = "/api/admin/reports/{tracking_id}",
    params(
        ("tracking_id" = String, Path, description = "Report tracking id")
    ),
    responses(
        (status = 200, description = "Report details", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_report(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ReportService>>,
    Path(tracking_id): Path<String>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.lookup(&tracking_id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Update status, priority or assignee of a report
#[utoipa::path(
    patch,
    path = "/api/admin/reports/{tracking_id}",
    params(
        ("tracking_id" = String, Path, description = "Report tracking id")
    ),
    request_body = UpdateReportDto,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Empty or invalid update"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_report(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<ReportService>>,
    Path(tracking_id): Path<String>,
    AppJson(dto): AppJson<UpdateReportDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let changes = dto.into_changes()?;
    let id = TrackingId::parse(&tracking_id)
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", tracking_id)))?;

    let updated = match changes {
        ReportChanges {
            status: Some(status),
            priority: None,
            assigned_to: None,
        } => service.update_status(&id, status).await?,
        ReportChanges {
            status: None,
            priority: Some(priority),
            assigned_to: None,
        } => service.update_priority(&id, priority).await?,
        ReportChanges {
            status: None,
            priority: None,
            assigned_to: Some(assignee),
        } => service.update_assignment(&id, assignee).await?,
        changes => service.apply_changes(&id, changes).await?,
    };

    tracing::info!(admin = %admin.sub, id = %updated.id, "Report updated by admin");

    Ok(Json(ApiResponse::success(
        Some(updated.into()),
        Some("Report updated".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::admin::routes::routes;
    use crate::features::auth::model::AuthenticatedAdmin;
    use crate::features::reports::{InMemoryReportRepository, ReportRepository, ReportService};
    use crate::shared::test_helpers::{sample_reports, with_identity};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn server_as(identity: AuthenticatedAdmin) -> TestServer {
        let repository = Arc::new(InMemoryReportRepository::new());
        for report in sample_reports() {
            repository.insert(report).await.unwrap();
        }
        let service = Arc::new(ReportService::new(repository));
        TestServer::new(with_identity(routes(service), identity)).unwrap()
    }

    #[tokio::test]
    async fn test_identity_without_admin_role_is_forbidden() {
        let server = server_as(AuthenticatedAdmin {
            sub: "reviewer@university.edu".to_string(),
            roles: vec!["reviewer".to_string()],
        })
        .await;

        server.get("/reports").await.assert_status_forbidden();
        server
            .patch("/reports/SR1735502A8B3")
            .json(&json!({ "status": "resolved" }))
            .await
            .assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_admin_identity_can_reassign() {
        let server = server_as(AuthenticatedAdmin::admin("admin@university.edu")).await;

        let response = server
            .patch("/reports/SR1735502E5F6")
            .json(&json!({ "assignedTo": "  Campus Security  " }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["assignedTo"], "Campus Security");
        assert_eq!(body["data"]["status"], "resolved");
        assert_eq!(body["message"], "Report updated");
    }

    #[tokio::test]
    async fn test_single_field_updates_leave_other_fields_alone() {
        let server = server_as(AuthenticatedAdmin::admin("admin@university.edu")).await;

        let body: Value = server
            .patch("/reports/SR1735502C9D4")
            .json(&json!({ "priority": "critical" }))
            .await
            .json();
        assert_eq!(body["data"]["priority"], "critical");
        assert_eq!(body["data"]["status"], "in-progress");
        let assignee = body["data"]["assignedTo"].clone();

        let body: Value = server
            .patch("/reports/SR1735502C9D4")
            .json(&json!({ "status": "escalated" }))
            .await
            .json();
        assert_eq!(body["data"]["status"], "escalated");
        assert_eq!(body["data"]["priority"], "critical");
        assert_eq!(body["data"]["assignedTo"], assignee);

        let body: Value = server
            .patch("/reports/SR1735502C9D4")
            .json(&json!({ "assignedTo": null }))
            .await
            .json();
        assert!(body["data"]["assignedTo"].is_null());
        assert_eq!(body["data"]["status"], "escalated");
    }

    #[tokio::test]
    async fn test_update_of_malformed_or_unknown_id_is_not_found() {
        let server = server_as(AuthenticatedAdmin::admin("admin@university.edu")).await;

        for path in ["/reports/not-an-id", "/reports/SRNOSUCHID01"] {
            server
                .patch(path)
                .json(&json!({ "status": "resolved", "priority": "low" }))
                .await
                .assert_status_not_found();
        }
    }

    #[tokio::test]
    async fn test_blank_assignee_is_rejected() {
        let server = server_as(AuthenticatedAdmin::admin("admin@university.edu")).await;

        server
            .patch("/reports/SR1735502E5F6")
            .json(&json!({ "assignedTo": "   " }))
            .await
            .assert_status_bad_request();
    }
}
