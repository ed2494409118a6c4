mod report;

pub use report::{
    format_tracking_number, NewReport, Report, ReportCategory, ReportSeverity, ReportStatus,
};
