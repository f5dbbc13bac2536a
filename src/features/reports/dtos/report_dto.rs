use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reports::filter::{parse_dimension, ReportFilter};
use crate::features::reports::models::{
    Report, ReportCategory, ReportChanges, ReportPriority, ReportStatus, TrackingId,
};
use crate::shared::constants::MAX_SHORT_TEXT_LENGTH;

// =============================================================================
// INTAKE
// =============================================================================

/// Request DTO for submitting an anonymous report
///
/// `category` and `description` are kept loose here so that missing or unknown
/// values surface as field-level validation errors rather than JSON errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportDto {
    /// One of the category values from `GET /api/categories`
    #[schema(example = "safety")]
    pub category: Option<String>,

    /// What happened (required)
    #[serde(default)]
    pub description: String,

    /// Where it happened
    pub location: Option<String>,

    /// When it happened, RFC 3339 or `YYYY-MM-DDTHH:MM` (UTC)
    #[schema(example = "2024-01-15T10:30")]
    pub occurred_at: Option<String>,

    /// References to supporting files (names or storage keys only)
    #[serde(default)]
    #[validate(length(max = 5, message = "At most 5 attachments are allowed"))]
    pub attachments: Vec<String>,
}

/// Response DTO for a successful submission
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportResponseDto {
    pub tracking_id: TrackingId,
}

/// What a reporter can see when following up with their tracking id
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatusDto {
    pub tracking_id: TrackingId,
    pub status: ReportStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportStatusDto {
    fn from(r: Report) -> Self {
        Self {
            tracking_id: r.id,
            status: r.status,
            submitted_at: r.submitted_at,
            updated_at: r.updated_at,
        }
    }
}

// =============================================================================
// ADMIN
// =============================================================================

/// Full report as seen by an admin
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: TrackingId,
    pub category: ReportCategory,
    pub description: String,
    pub location: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub attachments: Vec<String>,
    pub status: ReportStatus,
    pub priority: Option<ReportPriority>,
    pub assigned_to: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            category: r.category,
            description: r.description,
            location: r.location,
            occurred_at: r.occurred_at,
            attachments: r.attachments,
            status: r.status,
            priority: r.priority,
            assigned_to: r.assigned_to,
            submitted_at: r.submitted_at,
            updated_at: r.updated_at,
        }
    }
}

/// Query params for listing reports. `all` or an empty value disables a filter.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQueryParams {
    /// Case-insensitive substring of the tracking id or description
    pub q: Option<String>,
    /// under-review, in-progress, resolved, escalated or all
    pub status: Option<String>,
    /// low, medium, high, critical or all
    pub priority: Option<String>,
}

impl ReportQueryParams {
    pub fn to_filter(&self) -> Result<ReportFilter> {
        let mut errors = Vec::new();

        let status = parse_dimension::<ReportStatus>("status", self.status.as_deref())
            .unwrap_or_else(|e| collect(&mut errors, e));
        let priority = parse_dimension::<ReportPriority>("priority", self.priority.as_deref())
            .unwrap_or_else(|e| collect(&mut errors, e));

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        let mut filter = ReportFilter::default();
        if let Some(needle) = self.q.as_deref() {
            filter = filter.with_search(needle);
        }
        if let Some(status) = status {
            filter = filter.with_status(status);
        }
        if let Some(priority) = priority {
            filter = filter.with_priority(priority);
        }
        Ok(filter)
    }
}

fn collect<T>(errors: &mut Vec<String>, err: AppError) -> Option<T> {
    match err {
        AppError::Validation(fields) => errors.extend(fields),
        other => errors.push(other.to_string()),
    }
    None
}

/// Request DTO for updating a report. Omitted fields are left alone;
/// `assignedTo: null` removes the current assignee.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateReportDto {
    pub status: Option<ReportStatus>,
    pub priority: Option<ReportPriority>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub assigned_to: Option<Option<String>>,
}

/// Distinguishes an explicit `null` from an omitted field
fn deserialize_some<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl UpdateReportDto {
    pub fn into_changes(self) -> Result<ReportChanges> {
        let assigned_to = match self.assigned_to {
            Some(Some(raw)) => {
                let assignee = raw.trim();
                if assignee.is_empty() {
                    return Err(AppError::field(
                        "assignedTo",
                        "must not be blank (send null to clear)",
                    ));
                }
                if assignee.chars().count() as u64 > MAX_SHORT_TEXT_LENGTH {
                    return Err(AppError::field(
                        "assignedTo",
                        "must not exceed 255 characters",
                    ));
                }
                Some(Some(assignee.to_string()))
            }
            other => other,
        };

        let changes = ReportChanges {
            status: self.status,
            priority: self.priority,
            assigned_to,
        };
        if changes.is_empty() {
            return Err(AppError::Validation(vec![
                "body: provide at least one of status, priority, assignedTo".to_string(),
            ]));
        }
        Ok(changes)
    }
}

/// Dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryDto {
    pub total: i64,
    pub under_review: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub escalated: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_dto_distinguishes_null_from_missing() {
        let cleared: UpdateReportDto = serde_json::from_str(r#"{"assignedTo": null}"#).unwrap();
        assert_eq!(cleared.assigned_to, Some(None));

        let untouched: UpdateReportDto = serde_json::from_str(r#"{"status": "resolved"}"#).unwrap();
        assert_eq!(untouched.assigned_to, None);
        assert_eq!(untouched.status, Some(ReportStatus::Resolved));
    }

    #[test]
    fn test_update_dto_rejects_empty_patch() {
        let dto: UpdateReportDto = serde_json::from_str("{}").unwrap();
        assert!(matches!(dto.into_changes(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_dto_rejects_unknown_fields() {
        let parsed = serde_json::from_str::<UpdateReportDto>(r#"{"description": "edited"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_update_dto_trims_assignee() {
        let dto: UpdateReportDto =
            serde_json::from_str(r#"{"assignedTo": "  Dr. Smith  "}"#).unwrap();
        let changes = dto.into_changes().unwrap();
        assert_eq!(changes.assigned_to, Some(Some("Dr. Smith".to_string())));

        let blank: UpdateReportDto = serde_json::from_str(r#"{"assignedTo": "   "}"#).unwrap();
        assert!(blank.into_changes().is_err());
    }

    #[test]
    fn test_query_params_collect_all_errors() {
        let params = ReportQueryParams {
            q: None,
            status: Some("closed".to_string()),
            priority: Some("urgent".to_string()),
        };
        match params.to_filter() {
            Err(AppError::Validation(fields)) => assert_eq!(fields.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_query_params_wildcards() {
        let params = ReportQueryParams {
            q: Some("lighting".to_string()),
            status: Some("all".to_string()),
            priority: Some("".to_string()),
        };
        let filter = params.to_filter().unwrap();
        assert_eq!(filter.status, None);
        assert_eq!(filter.priority, None);
        assert_eq!(filter.search(), Some("lighting"));
    }
}
