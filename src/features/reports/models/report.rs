use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::TRACKING_NUMBER_PREFIX;

/// Report category enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    Garbage,
    Pothole,
    Streetlight,
    Traffic,
    Vandalism,
    WaterSupply,
    Drainage,
    Other,
}

impl std::str::FromStr for ReportCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.trim().to_string()))
            .map_err(|_| format!("Unknown report category: {}", s))
    }
}

/// Report severity enum matching database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "report_severity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportSeverity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl std::str::FromStr for ReportSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.trim().to_string()))
            .map_err(|_| format!("Unknown report severity: {}", s))
    }
}

/// Report status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Submitted,
    InReview,
    Assigned,
    InProgress,
    Resolved,
    Rejected,
}

impl ReportStatus {
    /// The ordered workflow shown as a progress indicator. `Rejected` is not part of it.
    pub const TIMELINE: [ReportStatus; 5] = [
        ReportStatus::Submitted,
        ReportStatus::InReview,
        ReportStatus::Assigned,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
    ];

    /// Zero-based position in [`Self::TIMELINE`]
    pub fn timeline_position(self) -> Option<usize> {
        Self::TIMELINE.iter().position(|s| *s == self)
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportStatus::Submitted => "Submitted",
            ReportStatus::InReview => "In Review",
            ReportStatus::Assigned => "Assigned",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Resolved => "Resolved",
            ReportStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            ReportStatus::Submitted => "submitted",
            ReportStatus::InReview => "in_review",
            ReportStatus::Assigned => "assigned",
            ReportStatus::InProgress => "in_progress",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Rejected => "rejected",
        };
        write!(f, "{}", value)
    }
}

/// Database model for report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub tracking_number: String,
    pub user_id: Option<Uuid>,
    pub category: ReportCategory,
    pub severity: ReportSeverity,
    pub status: ReportStatus,
    pub title: String,
    pub description: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_urls: Vec<String>,
    pub assigned_to: Option<String>,
    pub admin_remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Report {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == Some(user_id)
    }
}

/// Data for inserting a new report (status is always `submitted`)
#[derive(Debug, Clone)]
pub struct NewReport {
    pub user_id: Option<Uuid>,
    pub category: ReportCategory,
    pub severity: ReportSeverity,
    pub title: String,
    pub description: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_urls: Vec<String>,
}

/// Format: `CR-YYYY-NNNNNN` (sequence zero-padded to at least 6 digits)
pub fn format_tracking_number(year: i32, sequence: i64) -> String {
    format!("{}-{}-{:06}", TRACKING_NUMBER_PREFIX, year, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::TRACKING_NUMBER_REGEX;

    #[test]
    fn test_timeline_excludes_rejected() {
        assert_eq!(ReportStatus::Submitted.timeline_position(), Some(0));
        assert_eq!(ReportStatus::InProgress.timeline_position(), Some(3));
        assert_eq!(ReportStatus::Resolved.timeline_position(), Some(4));
        assert_eq!(ReportStatus::Rejected.timeline_position(), None);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_value(ReportCategory::WaterSupply).unwrap(),
            "water_supply"
        );
        assert_eq!(
            serde_json::to_value(ReportStatus::InReview).unwrap(),
            "in_review"
        );
        assert_eq!(ReportStatus::InProgress.to_string(), "in_progress");
        assert_eq!("pothole".parse::<ReportCategory>(), Ok(ReportCategory::Pothole));
        assert!("volcano".parse::<ReportCategory>().is_err());
        assert_eq!("critical".parse::<ReportSeverity>(), Ok(ReportSeverity::Critical));
        assert_eq!(ReportSeverity::default(), ReportSeverity::Medium);
    }

    #[test]
    fn test_tracking_number_format() {
        let number = format_tracking_number(2026, 42);
        assert_eq!(number, "CR-2026-000042");
        assert!(TRACKING_NUMBER_REGEX.is_match(&number));

        let large = format_tracking_number(2026, 12_345_678);
        assert_eq!(large, "CR-2026-12345678");
        assert!(TRACKING_NUMBER_REGEX.is_match(&large));
    }
}
