//! Case review for administrators.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/reports` | List reports (`status`, `priority`, `q` filters) |
//! | GET | `/api/admin/reports/summary` | Counts per status |
//! | GET | `/api/admin/reports/{tracking_id}` | Report details |
//! | PATCH | `/api/admin/reports/{tracking_id}` | Change status, priority or assignee |
//!
//! Every route needs a bearer token with the `admin` role.

pub mod handlers;
pub mod routes;
