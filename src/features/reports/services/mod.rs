mod intake_service;
mod report_service;

pub use intake_service::IntakeService;
pub use report_service::ReportService;
