use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::reports::filter::ReportFilter;
use crate::features::reports::models::{Report, ReportChanges, ReportStatus, TrackingId};
use crate::features::reports::repository::ReportRepository;

const REPORT_COLUMNS: &str = "id, category, description, location, occurred_at, attachments, \
     status, priority, assigned_to, submitted_at, updated_at";

/// Registry backed by the `reports` table. Insertion order comes from the
/// `seq` column; every update is one `UPDATE ... RETURNING` statement.
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn insert(&self, report: Report) -> Result<Report> {
        let sql = format!(
            r#"
            INSERT INTO reports (
                id, category, description, location, occurred_at, attachments,
                status, priority, assigned_to, submitted_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            REPORT_COLUMNS
        );

        sqlx::query_as::<_, Report>(&sql)
            .bind(&report.id)
            .bind(report.category)
            .bind(&report.description)
            .bind(&report.location)
            .bind(report.occurred_at)
            .bind(&report.attachments)
            .bind(report.status)
            .bind(report.priority)
            .bind(&report.assigned_to)
            .bind(report.submitted_at)
            .bind(report.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict(
                    format!("Tracking id {} is already in use", report.id),
                ),
                other => {
                    tracing::error!("Failed to insert report: {:?}", other);
                    AppError::Database(other)
                }
            })
    }

    async fn get(&self, id: &TrackingId) -> Result<Option<Report>> {
        let sql = format!("SELECT {} FROM reports WHERE id = $1", REPORT_COLUMNS);

        sqlx::query_as::<_, Report>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get report: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list(&self, filter: &ReportFilter) -> Result<Vec<Report>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM reports WHERE TRUE", REPORT_COLUMNS));

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(priority) = filter.priority {
            query.push(" AND priority = ").push_bind(priority);
        }
        if let Some(needle) = filter.search() {
            // strpos keeps `%` and `_` in the needle literal, unlike LIKE
            query
                .push(" AND (strpos(lower(id), ")
                .push_bind(needle.to_string())
                .push(") > 0 OR strpos(lower(description), ")
                .push_bind(needle.to_string())
                .push(") > 0)");
        }
        query.push(" ORDER BY seq ASC");

        query
            .build_query_as::<Report>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update(&self, id: &TrackingId, changes: &ReportChanges) -> Result<Option<Report>> {
        let sql = format!(
            r#"
            UPDATE reports
            SET status = COALESCE($2, status),
                priority = COALESCE($3, priority),
                assigned_to = CASE WHEN $4 THEN $5 ELSE assigned_to END,
                updated_at = $6
            WHERE id = $1
            RETURNING {}
            "#,
            REPORT_COLUMNS
        );

        let (assign, assignee) = match &changes.assigned_to {
            Some(value) => (true, value.clone()),
            None => (false, None),
        };

        sqlx::query_as::<_, Report>(&sql)
            .bind(id)
            .bind(changes.status)
            .bind(changes.priority)
            .bind(assign)
            .bind(assignee)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update report {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn count_by_status(&self) -> Result<HashMap<ReportStatus, i64>> {
        let rows = sqlx::query_as::<_, (ReportStatus, i64)>(
            "SELECT status, COUNT(*) FROM reports GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count reports by status: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().collect())
    }
}
