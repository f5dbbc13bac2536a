//! Anonymous report intake and the case registry.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/reports` | No | Submit a report, returns a tracking id |
//! | GET | `/api/reports/{tracking_id}/status` | No | Follow up on a report |
//!
//! Admin listing and updates are exposed by the admin feature.

pub mod dtos;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod services;

pub use repository::{InMemoryReportRepository, PgReportRepository, ReportRepository};
pub use services::{IntakeService, ReportService};
