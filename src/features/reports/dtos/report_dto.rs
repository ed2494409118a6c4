use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{Report, ReportCategory, ReportSeverity, ReportStatus};

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub tracking_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
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
    pub timeline: StatusTimelineDto,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            timeline: StatusTimelineDto::for_status(r.status),
            id: r.id,
            tracking_number: r.tracking_number,
            user_id: r.user_id,
            category: r.category,
            severity: r.severity,
            status: r.status,
            title: r.title,
            description: r.description,
            address: r.address,
            city: r.city,
            state: r.state,
            postal_code: r.postal_code,
            latitude: r.latitude,
            longitude: r.longitude,
            image_urls: r.image_urls,
            assigned_to: r.assigned_to,
            admin_remarks: r.admin_remarks,
            created_at: r.created_at,
            updated_at: r.updated_at,
            resolved_at: r.resolved_at,
        }
    }
}

impl ReportResponseDto {
    /// Public tracking view: the owner is never disclosed
    pub fn without_owner(mut self) -> Self {
        self.user_id = None;
        self
    }
}

// =============================================================================
// STATUS TIMELINE
// =============================================================================

/// One step of the fixed five-step progress indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimelineStepDto {
    pub status: ReportStatus,
    pub label: String,
    pub completed: bool,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusTimelineDto {
    pub steps: Vec<TimelineStepDto>,
    /// Zero-based index of the current step; absent for rejected reports
    pub current_step: Option<usize>,
    pub is_rejected: bool,
}

impl StatusTimelineDto {
    pub fn for_status(status: ReportStatus) -> Self {
        let position = status.timeline_position();

        let steps = ReportStatus::TIMELINE
            .iter()
            .enumerate()
            .map(|(index, step)| TimelineStepDto {
                status: *step,
                label: step.label().to_string(),
                // A rejected report was still submitted.
                completed: position.map_or(index == 0, |p| index <= p),
                current: position == Some(index),
            })
            .collect();

        Self {
            steps,
            current_step: position,
            is_rejected: status == ReportStatus::Rejected,
        }
    }
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// Text fields of a report submission, collected from the multipart form
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateReportForm {
    pub category: Option<ReportCategory>,
    pub severity: Option<ReportSeverity>,
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 5000, message = "description must be 1-5000 characters"))]
    pub description: String,
    #[validate(length(max = 500, message = "address must be at most 500 characters"))]
    pub address: Option<String>,
    #[validate(length(max = 100, message = "city must be at most 100 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 100, message = "state must be at most 100 characters"))]
    pub state: Option<String>,
    #[validate(length(max = 20, message = "postal_code must be at most 20 characters"))]
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// An image part read from the submission form
#[derive(Debug, Clone)]
pub struct ReportImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Multipart request body, for Swagger UI documentation only.
/// The handler reads fields with axum's Multipart extractor.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SubmitReportDto {
    #[schema(example = "pothole")]
    pub category: ReportCategory,
    pub severity: Option<ReportSeverity>,
    #[schema(example = "Deep pothole near the market")]
    pub title: String,
    pub description: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Up to 5 binary image parts (jpeg, png, gif, webp), each named `images`
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitReportResponseDto {
    #[serde(flatten)]
    pub report: ReportResponseDto,
    /// Images that could not be stored and were left off the report
    pub failed_uploads: usize,
}

/// Allowed MIME types for report images
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

pub fn is_image_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

pub fn extension_for_image_type(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}

// =============================================================================
// GEOCODING
// =============================================================================

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ReverseGeocodeQuery {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

/// Address fields resolved from coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeocodedAddressDto {
    pub display_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
}
