use chrono::{TimeZone, Utc};

use crate::features::reports::models::{
    Report, ReportCategory, ReportPriority, ReportStatus, TrackingId,
};

/// Sample cases used for demos and tests
pub fn demo_reports() -> Vec<Report> {
    vec![
        demo(
            "SR1735502A8B3",
            ReportCategory::Harassment,
            "Inappropriate comments made by a senior student during orientation week...",
            "Main Campus Auditorium",
            ReportStatus::UnderReview,
            ReportPriority::High,
            "Dr. Smith",
            (2024, 1, 15, 10, 30),
        ),
        demo(
            "SR1735502C9D4",
            ReportCategory::Bullying,
            "Repeated exclusion from group activities and verbal intimidation...",
            "Student Housing Block B",
            ReportStatus::InProgress,
            ReportPriority::Medium,
            "Ms. Johnson",
            (2024, 1, 14, 14, 20),
        ),
        demo(
            "SR1735502E5F6",
            ReportCategory::Safety,
            "Broken lighting in parking area creating unsafe conditions...",
            "Parking Lot C",
            ReportStatus::Resolved,
            ReportPriority::Low,
            "Maintenance Team",
            (2024, 1, 10, 9, 15),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn demo(
    id: &str,
    category: ReportCategory,
    description: &str,
    location: &str,
    status: ReportStatus,
    priority: ReportPriority,
    assigned_to: &str,
    (year, month, day, hour, minute): (i32, u32, u32, u32, u32),
) -> Report {
    let submitted_at = Utc
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_else(Utc::now);

    Report {
        // Sample ids are fixed literals that satisfy the tracking id format
        id: TrackingId::parse(id).unwrap_or_else(TrackingId::generate),
        category,
        description: description.to_string(),
        location: Some(location.to_string()),
        occurred_at: None,
        attachments: Vec::new(),
        status,
        priority: Some(priority),
        assigned_to: Some(assigned_to.to_string()),
        submitted_at,
        updated_at: submitted_at,
    }
}
