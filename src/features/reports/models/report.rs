use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

use crate::features::reports::models::TrackingId;

/// Raised when a wire value does not name a known enum variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub value: String,
    pub expected: Vec<&'static str>,
}

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown value '{}' (expected one of: {})",
            self.value,
            self.expected.join(", ")
        )
    }
}

/// Generates `as_str`, `Display`, `FromStr` and `ALL` for a kebab-case wire enum
macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        value: other.to_string(),
                        expected: $name::ALL.iter().map(|v| v.as_str()).collect(),
                    }),
                }
            }
        }
    };
}

/// Kind of concern being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_category", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ReportCategory {
    Harassment,
    Bullying,
    Ragging,
    Discrimination,
    MentalHealth,
    Safety,
    Academic,
    Other,
}

wire_enum!(ReportCategory {
    Harassment => "harassment",
    Bullying => "bullying",
    Ragging => "ragging",
    Discrimination => "discrimination",
    MentalHealth => "mental-health",
    Safety => "safety",
    Academic => "academic",
    Other => "other",
});

impl ReportCategory {
    /// Human readable label shown on the intake form
    pub fn label(&self) -> &'static str {
        match self {
            ReportCategory::Harassment => "Harassment",
            ReportCategory::Bullying => "Bullying",
            ReportCategory::Ragging => "Ragging",
            ReportCategory::Discrimination => "Discrimination",
            ReportCategory::MentalHealth => "Mental Health Concerns",
            ReportCategory::Safety => "Safety Issues",
            ReportCategory::Academic => "Academic Misconduct",
            ReportCategory::Other => "Other",
        }
    }
}

/// Review status of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    UnderReview,
    InProgress,
    Resolved,
    Escalated,
}

wire_enum!(ReportStatus {
    UnderReview => "under-review",
    InProgress => "in-progress",
    Resolved => "resolved",
    Escalated => "escalated",
});

/// Admin-assigned urgency; never set at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportPriority {
    Low,
    Medium,
    High,
    Critical,
}

wire_enum!(ReportPriority {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

/// A report held by the case registry
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Report {
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

/// Validated intake data, before an identifier has been assigned
#[derive(Debug, Clone)]
pub struct NewReport {
    pub category: ReportCategory,
    pub description: String,
    pub location: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub attachments: Vec<String>,
}

impl NewReport {
    /// Materialise the record under `id`; every report starts under review
    pub fn into_report(self, id: TrackingId, now: DateTime<Utc>) -> Report {
        Report {
            id,
            category: self.category,
            description: self.description,
            location: self.location,
            occurred_at: self.occurred_at,
            attachments: self.attachments,
            status: ReportStatus::UnderReview,
            priority: None,
            assigned_to: None,
            submitted_at: now,
            updated_at: now,
        }
    }
}

/// Admin mutation of a report. `None` leaves a field untouched;
/// `assigned_to: Some(None)` clears the assignee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportChanges {
    pub status: Option<ReportStatus>,
    pub priority: Option<ReportPriority>,
    pub assigned_to: Option<Option<String>>,
}

impl ReportChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.assigned_to.is_none()
    }

    /// Apply the changes in place, stamping `updated_at`
    pub fn apply_to(&self, report: &mut Report, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            report.status = status;
        }
        if let Some(priority) = self.priority {
            report.priority = Some(priority);
        }
        if let Some(assignee) = &self.assigned_to {
            report.assigned_to = assignee.clone();
        }
        report.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        for category in ReportCategory::ALL {
            assert_eq!(category.as_str().parse::<ReportCategory>(), Ok(*category));
        }
        assert_eq!(
            "mental-health".parse::<ReportCategory>(),
            Ok(ReportCategory::MentalHealth)
        );
        assert_eq!(
            "under-review".parse::<ReportStatus>(),
            Ok(ReportStatus::UnderReview)
        );
        assert!("Under-Review".parse::<ReportStatus>().is_err());
        assert!("urgent".parse::<ReportPriority>().is_err());
    }

    #[test]
    fn test_unknown_value_lists_accepted_values() {
        let err = "urgent".parse::<ReportPriority>().unwrap_err();
        assert_eq!(err.value, "urgent");
        assert_eq!(err.expected, vec!["low", "medium", "high", "critical"]);
        assert_eq!(
            err.to_string(),
            "unknown value 'urgent' (expected one of: low, medium, high, critical)"
        );
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::to_string(&ReportCategory::MentalHealth).unwrap(),
            "\"mental-health\""
        );
        assert_eq!(
            serde_json::to_string(&ReportPriority::Critical).unwrap(),
            "\"critical\""
        );
    }

    #[test]
    fn test_new_report_starts_under_review_without_priority() {
        let now = Utc::now();
        let report = NewReport {
            category: ReportCategory::Safety,
            description: "Broken lighting".to_string(),
            location: None,
            occurred_at: None,
            attachments: vec![],
        }
        .into_report(TrackingId::generate(), now);

        assert_eq!(report.status, ReportStatus::UnderReview);
        assert_eq!(report.priority, None);
        assert_eq!(report.assigned_to, None);
        assert_eq!(report.submitted_at, now);
        assert_eq!(report.updated_at, now);
    }

    #[test]
    fn test_changes_apply_only_given_fields() {
        let created = Utc::now();
        let mut report = NewReport {
            category: ReportCategory::Bullying,
            description: "Exclusion from group activities".to_string(),
            location: None,
            occurred_at: None,
            attachments: vec![],
        }
        .into_report(TrackingId::generate(), created);
        report.assigned_to = Some("Ms. Johnson".to_string());

        let later = created + chrono::Duration::minutes(5);
        ReportChanges {
            priority: Some(ReportPriority::Medium),
            ..Default::default()
        }
        .apply_to(&mut report, later);

        assert_eq!(report.status, ReportStatus::UnderReview);
        assert_eq!(report.priority, Some(ReportPriority::Medium));
        assert_eq!(report.assigned_to.as_deref(), Some("Ms. Johnson"));
        assert_eq!(report.updated_at, later);

        ReportChanges {
            assigned_to: Some(None),
            ..Default::default()
        }
        .apply_to(&mut report, later);
        assert_eq!(report.assigned_to, None);
    }
}
