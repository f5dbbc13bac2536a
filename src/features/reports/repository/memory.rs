use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::reports::filter::ReportFilter;
use crate::features::reports::models::{Report, ReportChanges, ReportStatus, TrackingId};
use crate::features::reports::repository::ReportRepository;

#[derive(Default)]
struct Registry {
    /// Records in insertion order
    records: Vec<Report>,
    /// Position of each record in `records`
    index: HashMap<TrackingId, usize>,
}

/// Process-wide registry. Writers take the lock exclusively, so updates to the
/// same record never interleave; readers get a copy taken under the read lock.
#[derive(Default)]
pub struct InMemoryReportRepository {
    inner: RwLock<Registry>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn insert(&self, report: Report) -> Result<Report> {
        let mut registry = self.inner.write().await;
        if registry.index.contains_key(&report.id) {
            return Err(AppError::Conflict(format!(
                "Tracking id {} is already in use",
                report.id
            )));
        }

        let position = registry.records.len();
        registry.index.insert(report.id.clone(), position);
        registry.records.push(report.clone());
        Ok(report)
    }

    async fn get(&self, id: &TrackingId) -> Result<Option<Report>> {
        let registry = self.inner.read().await;
        Ok(registry
            .index
            .get(id)
            .map(|&position| registry.records[position].clone()))
    }

    async fn list(&self, filter: &ReportFilter) -> Result<Vec<Report>> {
        let registry = self.inner.read().await;
        Ok(filter.apply(&registry.records))
    }

    async fn update(&self, id: &TrackingId, changes: &ReportChanges) -> Result<Option<Report>> {
        let mut registry = self.inner.write().await;
        let Some(&position) = registry.index.get(id) else {
            return Ok(None);
        };

        let report = &mut registry.records[position];
        changes.apply_to(report, Utc::now());
        Ok(Some(report.clone()))
    }

    async fn count_by_status(&self) -> Result<HashMap<ReportStatus, i64>> {
        let registry = self.inner.read().await;
        let mut counts = HashMap::new();
        for report in &registry.records {
            *counts.entry(report.status).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
