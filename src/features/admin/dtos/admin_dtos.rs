use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::{Report, ReportCategory, ReportStatus};

// =============================================================================
// REPORT TRIAGE
// =============================================================================

/// Query params for the triage list
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct AdminReportQuery {
    /// Filter by category
    pub category: Option<ReportCategory>,
    /// Filter by status
    pub status: Option<ReportStatus>,
    /// Case-insensitive match on title, tracking number or city
    pub search: Option<String>,
}

impl AdminReportQuery {
    /// Lower-cased search needle; blank input means no search
    pub fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// `needle` must already be lower-case
pub fn matches_search(report: &Report, needle: &str) -> bool {
    report.title.to_lowercase().contains(needle)
        || report.tracking_number.to_lowercase().contains(needle)
        || report
            .city
            .as_deref()
            .is_some_and(|city| city.to_lowercase().contains(needle))
}

/// Counters shown above the triage list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportStatsDto {
    pub total: usize,
    /// Submitted and not yet reviewed
    pub new: usize,
    /// In review, assigned or in progress
    pub in_progress: usize,
    pub resolved: usize,
}

impl ReportStatsDto {
    pub fn from_reports(reports: &[Report]) -> Self {
        reports
            .iter()
            .fold(Self::default(), |mut stats, report| {
                stats.total += 1;
                match report.status {
                    ReportStatus::Submitted => stats.new += 1,
                    ReportStatus::InReview | ReportStatus::Assigned | ReportStatus::InProgress => {
                        stats.in_progress += 1
                    }
                    ReportStatus::Resolved => stats.resolved += 1,
                    ReportStatus::Rejected => {}
                }
                stats
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminReportListDto {
    pub reports: Vec<ReportResponseDto>,
    /// Computed before the search narrows the list
    pub stats: ReportStatsDto,
}

/// Partial update of a report. At least one field must be present.
///
/// Omitted fields are left as they are. An empty `assigned_to` or
/// `admin_remarks` clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReportDto {
    /// `resolved` stamps `resolved_at`; any other status clears it
    pub status: Option<ReportStatus>,

    /// Empty string unassigns the report
    #[validate(length(max = 200, message = "assigned_to must not exceed 200 characters"))]
    pub assigned_to: Option<String>,

    /// Empty string removes the remarks
    #[validate(length(max = 5000, message = "admin_remarks must not exceed 5000 characters"))]
    pub admin_remarks: Option<String>,
}

impl UpdateReportDto {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.assigned_to.is_none() && self.admin_remarks.is_none()
    }
}
