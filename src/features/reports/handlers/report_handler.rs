use std::sync::Arc;

use axum::{
    extract::{multipart::Field, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    is_image_type_allowed, CreateReportForm, GeocodedAddressDto, ReportImage,
    ReportResponseDto, ReverseGeocodeQuery, SubmitReportDto, SubmitReportResponseDto,
    ALLOWED_IMAGE_TYPES,
};
use crate::features::reports::models::{ReportCategory, ReportSeverity};
use crate::features::reports::services::ReportService;
use crate::shared::constants::{MAX_IMAGE_SIZE, MAX_REPORT_IMAGES};
use crate::shared::types::{ApiResponse, Meta};
use crate::shared::validation::validate_coordinates;

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
}

async fn read_text(field: Field<'_>, name: &str) -> Result<Option<String>> {
    let text = field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))?;
    let trimmed = text.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

fn parse_coordinate(value: Option<String>, name: &str) -> Result<Option<f64>> {
    value
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| AppError::Validation(format!("{} must be a number", name)))
        })
        .transpose()
}

/// Collect the text fields and image parts of a submission.
/// Rejects the request as soon as an image part is invalid or one too many.
async fn read_submission(
    mut multipart: Multipart,
) -> Result<(CreateReportForm, Vec<ReportImage>)> {
    let mut form = CreateReportForm::default();
    let mut images: Vec<ReportImage> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "images" => {
                let file_name = field.file_name().unwrap_or("unnamed").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;

                // Browsers send an empty part when no file was picked
                if data.is_empty() {
                    continue;
                }
                if images.len() == MAX_REPORT_IMAGES {
                    return Err(AppError::Validation(format!(
                        "At most {} images can be attached to a report",
                        MAX_REPORT_IMAGES
                    )));
                }
                if !is_image_type_allowed(&content_type) {
                    return Err(AppError::BadRequest(format!(
                        "Image type '{}' is not allowed. Allowed types: {}",
                        content_type,
                        ALLOWED_IMAGE_TYPES.join(", ")
                    )));
                }
                if data.len() > MAX_IMAGE_SIZE {
                    return Err(AppError::BadRequest(format!(
                        "Image '{}' is too large. Maximum size is {} MB",
                        file_name,
                        MAX_IMAGE_SIZE / 1024 / 1024
                    )));
                }

                images.push(ReportImage {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            "category" => {
                form.category = read_text(field, "category")
                    .await?
                    .map(|v| v.parse::<ReportCategory>())
                    .transpose()
                    .map_err(AppError::Validation)?;
            }
            "severity" => {
                form.severity = read_text(field, "severity")
                    .await?
                    .map(|v| v.parse::<ReportSeverity>())
                    .transpose()
                    .map_err(AppError::Validation)?;
            }
            "title" => form.title = read_text(field, "title").await?.unwrap_or_default(),
            "description" => {
                form.description = read_text(field, "description").await?.unwrap_or_default()
            }
            "address" => form.address = read_text(field, "address").await?,
            "city" => form.city = read_text(field, "city").await?,
            "state" => form.state = read_text(field, "state").await?,
            "postal_code" => form.postal_code = read_text(field, "postal_code").await?,
            "latitude" => {
                form.latitude = parse_coordinate(read_text(field, "latitude").await?, "latitude")?
            }
            "longitude" => {
                form.longitude =
                    parse_coordinate(read_text(field, "longitude").await?, "longitude")?
            }
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    Ok((form, images))
}

/// Submit a new report
///
/// Accepts multipart/form-data. Images that fail to upload are skipped and
/// counted in `failed_uploads`; the report is still created.
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    request_body(
        content = SubmitReportDto,
        content_type = "multipart/form-data",
        description = "Report fields plus up to 5 `images` parts",
    ),
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<SubmitReportResponseDto>),
        (status = 400, description = "Invalid form or images"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<SubmitReportResponseDto>>)> {
    let (form, images) = read_submission(multipart).await?;
    form.validate()?;

    let (report, failed_uploads) = state
        .report_service
        .submit(user.user_id, form, images)
        .await?;

    let message = (failed_uploads > 0)
        .then(|| format!("{} image(s) could not be uploaded", failed_uploads));
    let dto = SubmitReportResponseDto {
        report: report.into(),
        failed_uploads,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(dto), message, None)),
    ))
}

/// Track a report by its public tracking number
#[utoipa::path(
    get,
    path = "/api/reports/track/{tracking_number}",
    params(
        ("tracking_number" = String, Path, description = "Tracking number, e.g. CR-2026-000042")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn track_report(
    State(state): State<ReportState>,
    Path(tracking_number): Path<String>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state
        .report_service
        .get_by_tracking_number(&tracking_number)
        .await?;
    let dto = ReportResponseDto::from(report).without_owner();
    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// List reports submitted by the authenticated user, newest first
#[utoipa::path(
    get,
    path = "/api/reports/mine",
    responses(
        (status = 200, description = "List of user's reports", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_my_reports(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = state.report_service.list_by_user(user.user_id).await?;
    let total = reports.len() as i64;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get a report by ID (owner or admin)
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.report_service.get_by_id(id).await?;

    // Someone else's report is indistinguishable from a missing one
    if !report.is_owned_by(user.user_id) && !user.is_admin() {
        return Err(AppError::NotFound("Report not found".to_string()));
    }

    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Resolve coordinates to address fields for the submission form
///
/// Returns `data: null` when the location cannot be resolved.
#[utoipa::path(
    get,
    path = "/api/geocode/reverse",
    params(ReverseGeocodeQuery),
    responses(
        (status = 200, description = "Address, or null when unknown", body = ApiResponse<GeocodedAddressDto>),
        (status = 400, description = "Coordinates out of range"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn reverse_geocode(
    _user: AuthenticatedUser,
    State(state): State<ReportState>,
    Query(query): Query<ReverseGeocodeQuery>,
) -> Result<Json<ApiResponse<GeocodedAddressDto>>> {
    validate_coordinates(Some(query.lat), Some(query.lon)).map_err(AppError::Validation)?;

    let address = state
        .report_service
        .geocoding()
        .reverse_best_effort(query.lat, query.lon)
        .await;

    Ok(Json(ApiResponse::success(address, None, None)))
}
