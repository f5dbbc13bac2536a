//! Query/filter engine behind the admin listing.
//!
//! A filter is a conjunction of up to three predicates. An absent predicate is
//! the "all" wildcard for its dimension. Evaluation is a linear scan that keeps
//! the input order, so listings stay in insertion order.

use std::str::FromStr;

use crate::core::error::AppError;
use crate::features::reports::models::{Report, ReportPriority, ReportStatus};

/// Wire value that disables a dimension
pub const WILDCARD: &str = "all";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    /// Lower-cased needle matched against id and description
    search: Option<String>,
    pub status: Option<ReportStatus>,
    pub priority: Option<ReportPriority>,
}

impl ReportFilter {
    /// An empty needle leaves the search dimension open
    pub fn with_search(mut self, needle: &str) -> Self {
        self.search = Some(needle.to_lowercase()).filter(|s| !s.is_empty());
        self
    }

    pub fn with_status(mut self, status: ReportStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: ReportPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Cheap equality checks run before the substring scan
    pub fn matches(&self, report: &Report) -> bool {
        if let Some(status) = self.status {
            if report.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            // An unset priority never matches a concrete one
            if report.priority != Some(priority) {
                return false;
            }
        }
        match &self.search {
            Some(needle) => {
                report.id.as_str().to_lowercase().contains(needle.as_str())
                    || report.description.to_lowercase().contains(needle.as_str())
            }
            None => true,
        }
    }

    pub fn apply<'a, I>(&self, reports: I) -> Vec<Report>
    where
        I: IntoIterator<Item = &'a Report>,
    {
        reports
            .into_iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

/// Parse one filter dimension from its wire form. Empty and `all` mean no
/// constraint; anything else must name a variant.
pub fn parse_dimension<T>(field: &str, raw: Option<&str>) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.map(str::trim) {
        None | Some("") | Some(WILDCARD) => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::field(field, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::sample_reports;

    #[test]
    fn test_empty_filter_matches_everything_in_order() {
        let reports = sample_reports();
        let listed = ReportFilter::default().apply(&reports);
        assert_eq!(listed, reports);
    }

    #[test]
    fn test_status_filter_keeps_insertion_order() {
        let mut reports = sample_reports();
        reports[0].status = ReportStatus::Resolved;

        let listed = ReportFilter::default()
            .with_status(ReportStatus::Resolved)
            .apply(&reports);

        let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["SR1735502A8B3", "SR1735502E5F6"]);
        assert!(listed.iter().all(|r| r.status == ReportStatus::Resolved));
    }

    #[test]
    fn test_search_is_case_insensitive_on_description() {
        let reports = sample_reports();
        let listed = ReportFilter::default()
            .with_search("BROKEN LIGHTING")
            .apply(&reports);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id.as_str(), "SR1735502E5F6");
    }

    #[test]
    fn test_search_is_case_insensitive_on_id() {
        let reports = sample_reports();
        let listed = ReportFilter::default().with_search("c9d4").apply(&reports);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id.as_str(), "SR1735502C9D4");
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let reports = sample_reports();
        let filter = ReportFilter::default()
            .with_search("SR1735502")
            .with_priority(ReportPriority::High)
            .with_status(ReportStatus::UnderReview);
        let listed = filter.apply(&reports);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id.as_str(), "SR1735502A8B3");

        let none = filter.with_status(ReportStatus::Escalated).apply(&reports);
        assert!(none.is_empty());
    }

    #[test]
    fn test_unset_priority_never_matches() {
        let mut reports = sample_reports();
        for r in &mut reports {
            r.priority = None;
        }
        let listed = ReportFilter::default()
            .with_priority(ReportPriority::Low)
            .apply(&reports);
        assert!(listed.is_empty());
    }

    #[test]
    fn test_empty_search_is_wildcard() {
        let reports = sample_reports();
        let filter = ReportFilter::default().with_search("");
        assert_eq!(filter.search(), None);
        assert_eq!(filter.apply(&reports).len(), reports.len());
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension::<ReportStatus>("status", None).unwrap(), None);
        assert_eq!(
            parse_dimension::<ReportStatus>("status", Some("all")).unwrap(),
            None
        );
        assert_eq!(parse_dimension::<ReportStatus>("status", Some("")).unwrap(), None);
        assert_eq!(
            parse_dimension::<ReportStatus>("status", Some("resolved")).unwrap(),
            Some(ReportStatus::Resolved)
        );
        assert_eq!(
            parse_dimension::<ReportPriority>("priority", Some("critical")).unwrap(),
            Some(ReportPriority::Critical)
        );

        match parse_dimension::<ReportStatus>("status", Some("closed")) {
            Err(AppError::Validation(fields)) => assert_eq!(
                fields,
                vec![
                    "status: unknown value 'closed' (expected one of: under-review, in-progress, resolved, escalated)"
                        .to_string()
                ]
            ),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
