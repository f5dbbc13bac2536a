use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::ReportSummaryDto;
use crate::features::reports::filter::ReportFilter;
use crate::features::reports::models::{
    Report, ReportChanges, ReportPriority, ReportStatus, TrackingId,
};
use crate::features::reports::repository::ReportRepository;
use crate::features::reports::seed;

/// Case registry operations available to the admin role.
///
/// Status changes are unrestricted: any status may move to any other,
/// including out of `resolved`.
pub struct ReportService {
    repository: Arc<dyn ReportRepository>,
}

impl ReportService {
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: &TrackingId) -> Result<Report> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| not_found(id.as_str()))
    }

    /// Resolve a caller-supplied id. Malformed ids are reported as not found.
    pub async fn lookup(&self, raw_id: &str) -> Result<Report> {
        let id = TrackingId::parse(raw_id).ok_or_else(|| not_found(raw_id))?;
        self.get(&id).await
    }

    pub async fn list(&self, filter: &ReportFilter) -> Result<Vec<Report>> {
        self.repository.list(filter).await
    }

    pub async fn update_status(&self, id: &TrackingId, status: ReportStatus) -> Result<Report> {
        self.apply_changes(
            id,
            ReportChanges {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn update_priority(
        &self,
        id: &TrackingId,
        priority: ReportPriority,
    ) -> Result<Report> {
        self.apply_changes(
            id,
            ReportChanges {
                priority: Some(priority),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn update_assignment(
        &self,
        id: &TrackingId,
        assignee: Option<String>,
    ) -> Result<Report> {
        self.apply_changes(
            id,
            ReportChanges {
                assigned_to: Some(assignee),
                ..Default::default()
            },
        )
        .await
    }

    /// Apply any combination of status, priority and assignment in one write
    pub async fn apply_changes(&self, id: &TrackingId, changes: ReportChanges) -> Result<Report> {
        if changes.is_empty() {
            return Err(AppError::Validation(vec![
                "body: provide at least one of status, priority, assignedTo".to_string(),
            ]));
        }

        let report = self
            .repository
            .update(id, &changes)
            .await?
            .ok_or_else(|| not_found(id.as_str()))?;

        tracing::info!(
            "Report updated: id={}, status={}, priority={}, assigned={}",
            report.id,
            report.status,
            report
                .priority
                .map(|p| p.as_str())
                .unwrap_or("unset"),
            report.assigned_to.is_some()
        );
        Ok(report)
    }

    pub async fn summary(&self) -> Result<ReportSummaryDto> {
        let counts = self.repository.count_by_status().await?;
        let count = |status: ReportStatus| counts.get(&status).copied().unwrap_or(0);

        Ok(ReportSummaryDto {
            total: counts.values().sum(),
            under_review: count(ReportStatus::UnderReview),
            in_progress: count(ReportStatus::InProgress),
            resolved: count(ReportStatus::Resolved),
            escalated: count(ReportStatus::Escalated),
        })
    }

    /// Insert the sample cases if the registry is empty. Returns how many were added.
    pub async fn seed_demo_reports(&self) -> Result<usize> {
        if !self.repository.list(&ReportFilter::default()).await?.is_empty() {
            tracing::info!("Registry already populated, skipping demo reports");
            return Ok(0);
        }

        let reports = seed::demo_reports();
        let inserted = reports.len();
        for report in reports {
            self.repository.insert(report).await?;
        }
        tracing::info!("Seeded {} demo reports", inserted);
        Ok(inserted)
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Report {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::dtos::SubmitReportDto;
    use crate::features::reports::repository::InMemoryReportRepository;
    use crate::features::reports::services::IntakeService;

    async fn seeded() -> ReportService {
        let service = ReportService::new(Arc::new(InMemoryReportRepository::new()));
        service.seed_demo_reports().await.unwrap();
        service
    }

    fn id(raw: &str) -> TrackingId {
        TrackingId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_update_status_is_visible_through_get() {
        let service = seeded().await;
        let target = id("SR1735502A8B3");

        service
            .update_status(&target, ReportStatus::Escalated)
            .await
            .unwrap();

        let report = service.get(&target).await.unwrap();
        assert_eq!(report.status, ReportStatus::Escalated);
        assert!(report.updated_at > report.submitted_at);
    }

    #[tokio::test]
    async fn test_update_status_on_unknown_id_is_not_found() {
        let service = seeded().await;
        let err = service
            .update_status(&id("SRNONEXISTENT"), ReportStatus::Resolved)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resolved_can_move_back_to_under_review() {
        let service = seeded().await;
        let target = id("SR1735502E5F6");

        let report = service
            .update_status(&target, ReportStatus::UnderReview)
            .await
            .unwrap();
        assert_eq!(report.status, ReportStatus::UnderReview);
    }

    #[tokio::test]
    async fn test_priority_and_assignment_updates() {
        let service = seeded().await;
        let target = id("SR1735502C9D4");

        let report = service
            .update_priority(&target, ReportPriority::Critical)
            .await
            .unwrap();
        assert_eq!(report.priority, Some(ReportPriority::Critical));
        assert_eq!(report.status, ReportStatus::InProgress);

        let report = service
            .update_assignment(&target, Some("Counselling Office".to_string()))
            .await
            .unwrap();
        assert_eq!(report.assigned_to.as_deref(), Some("Counselling Office"));

        let report = service.update_assignment(&target, None).await.unwrap();
        assert_eq!(report.assigned_to, None);
    }

    #[tokio::test]
    async fn test_empty_changes_are_rejected() {
        let service = seeded().await;
        let err = service
            .apply_changes(&id("SR1735502C9D4"), ReportChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive_and_hides_malformed_ids() {
        let service = seeded().await;
        let report = service.lookup("sr1735502c9d4").await.unwrap();
        assert_eq!(report.id.as_str(), "SR1735502C9D4");

        let err = service.lookup("../admin").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_by_status_returns_exact_subset_in_order() {
        let service = seeded().await;
        service
            .update_status(&id("SR1735502A8B3"), ReportStatus::Resolved)
            .await
            .unwrap();

        let resolved = service
            .list(&ReportFilter::default().with_status(ReportStatus::Resolved))
            .await
            .unwrap();
        let ids: Vec<&str> = resolved.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["SR1735502A8B3", "SR1735502E5F6"]);
    }

    #[tokio::test]
    async fn test_fresh_submission_has_no_priority() {
        let repo = Arc::new(InMemoryReportRepository::new());
        let intake = IntakeService::new(repo.clone());
        let registry = ReportService::new(repo);

        let tracking_id = intake
            .submit(SubmitReportDto {
                category: Some("safety".to_string()),
                description: "Broken lighting".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let low = registry
            .list(&ReportFilter::default().with_priority(ReportPriority::Low))
            .await
            .unwrap();
        assert!(low.is_empty());

        let all = registry.list(&ReportFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, tracking_id);
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let service = seeded().await;
        service
            .update_status(&id("SR1735502C9D4"), ReportStatus::Escalated)
            .await
            .unwrap();

        let summary = service.summary().await.unwrap();
        assert_eq!(
            summary,
            ReportSummaryDto {
                total: 3,
                under_review: 1,
                in_progress: 0,
                resolved: 1,
                escalated: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_seeding_is_skipped_when_populated() {
        let service = seeded().await;
        assert_eq!(service.seed_demo_reports().await.unwrap(), 0);
        assert_eq!(service.list(&ReportFilter::default()).await.unwrap().len(), 3);
    }
}
