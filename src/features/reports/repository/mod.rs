//! Storage seam for the case registry.
//!
//! Implementations must keep insertion order for unfiltered listings, reject a
//! second insert under an existing id with `AppError::Conflict`, and apply
//! each update atomically with respect to other updates of the same record.

mod memory;
mod postgres;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::reports::filter::ReportFilter;
use crate::features::reports::models::{Report, ReportChanges, ReportStatus, TrackingId};

pub use memory::InMemoryReportRepository;
pub use postgres::PgReportRepository;

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Store a new report. Fails with `Conflict` if the id is already taken.
    async fn insert(&self, report: Report) -> Result<Report>;

    async fn get(&self, id: &TrackingId) -> Result<Option<Report>>;

    /// Snapshot of the reports matching `filter`, in insertion order
    async fn list(&self, filter: &ReportFilter) -> Result<Vec<Report>>;

    /// Apply `changes` and return the updated record, or `None` if `id` is unknown
    async fn update(&self, id: &TrackingId, changes: &ReportChanges) -> Result<Option<Report>>;

    /// Number of reports per status; statuses with no reports may be absent
    async fn count_by_status(&self) -> Result<HashMap<ReportStatus, i64>>;
}
