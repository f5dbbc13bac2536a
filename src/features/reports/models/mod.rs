mod report;
mod tracking_id;

pub use report::{
    NewReport, Report, ReportCategory, ReportChanges, ReportPriority, ReportStatus,
};
pub use tracking_id::TrackingId;
