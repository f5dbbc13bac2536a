use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use validator::Validate;

use crate::core::error::{field_messages, AppError, Result};
use crate::features::reports::dtos::SubmitReportDto;
use crate::features::reports::models::{NewReport, Report, ReportCategory, TrackingId};
use crate::features::reports::repository::ReportRepository;
use crate::shared::constants::{MAX_DESCRIPTION_LENGTH, MAX_SHORT_TEXT_LENGTH};
use crate::shared::validation::ATTACHMENT_REGEX;

/// Source of fresh tracking identifiers
pub type IdSource = Arc<dyn Fn() -> TrackingId + Send + Sync>;

/// Validation-and-creation boundary through which new reports enter the registry.
///
/// Only the report content is ever seen here. Nothing about the submitting
/// client (address, agent, headers) is passed in, stored or logged.
pub struct IntakeService {
    repository: Arc<dyn ReportRepository>,
    id_source: IdSource,
}

impl IntakeService {
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self::with_id_source(repository, Arc::new(TrackingId::generate))
    }

    pub fn with_id_source(repository: Arc<dyn ReportRepository>, id_source: IdSource) -> Self {
        Self {
            repository,
            id_source,
        }
    }

    /// Validate a submission, assign it a tracking id and store it under review
    pub async fn submit(&self, dto: SubmitReportDto) -> Result<TrackingId> {
        let new_report = validate_submission(dto).inspect_err(|e| {
            tracing::debug!("Rejected report submission: {}", e);
        })?;
        let category = new_report.category;

        let report = self.insert_with_fresh_id(new_report).await?;

        tracing::info!("Report submitted: id={}, category={}", report.id, category);
        Ok(report.id)
    }

    /// A colliding id is regenerated once; a second collision is surfaced
    async fn insert_with_fresh_id(&self, new_report: NewReport) -> Result<Report> {
        let now = Utc::now();
        let first = new_report.clone().into_report((self.id_source)(), now);

        match self.repository.insert(first).await {
            Err(AppError::Conflict(reason)) => {
                tracing::warn!("Tracking id collision ({}), regenerating", reason);
                self.repository
                    .insert(new_report.into_report((self.id_source)(), now))
                    .await
            }
            other => other,
        }
    }
}

/// Check every field and report all problems at once
fn validate_submission(dto: SubmitReportDto) -> Result<NewReport> {
    let mut errors = match dto.validate() {
        Ok(()) => Vec::new(),
        Err(e) => field_messages(&e),
    };

    let category = match dto.category.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push("category: is required".to_string());
            None
        }
        Some(raw) => match raw.parse::<ReportCategory>() {
            Ok(category) => Some(category),
            Err(e) => {
                errors.push(format!("category: {}", e));
                None
            }
        },
    };

    let description = dto.description.trim();
    if description.is_empty() {
        errors.push("description: must not be empty".to_string());
    } else if exceeds(description, MAX_DESCRIPTION_LENGTH) {
        errors.push(format!(
            "description: Description must not exceed {} characters",
            MAX_DESCRIPTION_LENGTH
        ));
    }

    // Lengths are measured on what would be stored
    let location = dto
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty());
    if location.is_some_and(|l| exceeds(l, MAX_SHORT_TEXT_LENGTH)) {
        errors.push(format!(
            "location: Location must not exceed {} characters",
            MAX_SHORT_TEXT_LENGTH
        ));
    }

    let occurred_at = match dto.occurred_at.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => {
            let parsed = parse_occurred_at(raw);
            if parsed.is_none() {
                errors.push(
                    "occurredAt: expected RFC 3339 or YYYY-MM-DDTHH:MM".to_string(),
                );
            }
            parsed
        }
    };

    for attachment in &dto.attachments {
        if !ATTACHMENT_REGEX.is_match(attachment.trim()) {
            errors.push(format!(
                "attachments: unsupported file '{}' (jpg, jpeg, png, pdf, doc, docx)",
                attachment
            ));
        }
    }

    let Some(category) = category.filter(|_| errors.is_empty()) else {
        errors.sort();
        return Err(AppError::Validation(errors));
    };

    Ok(NewReport {
        category,
        description: description.to_string(),
        location: location.map(String::from),
        occurred_at,
        attachments: dto
            .attachments
            .iter()
            .map(|a| a.trim().to_string())
            .collect(),
    })
}

fn exceeds(text: &str, max: u64) -> bool {
    text.chars().count() as u64 > max
}

/// Accept RFC 3339, or the naive `datetime-local` form interpreted as UTC
fn parse_occurred_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
