//! Fixed set of report categories, exposed for the intake form.

pub mod dtos;
pub mod handlers;
pub mod routes;
