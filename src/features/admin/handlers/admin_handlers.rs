use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::ValidatedJson;
use crate::features::admin::dtos::*;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::{RequireAdmin, RequireStaff};
use crate::features::contact::dtos::ContactMessageResponseDto;
use crate::features::reports::dtos::ReportResponseDto;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List reports for triage with summary stats
#[utoipa::path(
    get,
    path = "/api/admin/reports",
    params(AdminReportQuery),
    responses(
        (status = 200, description = "Filtered reports with stats", body = ApiResponse<AdminReportListDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_reports(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<AdminService>>,
    Query(query): Query<AdminReportQuery>,
) -> Result<Json<ApiResponse<AdminReportListDto>>> {
    let list = service.list_reports(&query).await?;
    let total = list.reports.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(list),
        None,
        Some(Meta { total }),
    )))
}

/// Update status, assignee or remarks of a report
#[utoipa::path(
    patch,
    path = "/api/admin/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = UpdateReportDto,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Empty or invalid update"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_report(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateReportDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    if dto.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    tracing::debug!("Admin {} updating report {}", user.user_id, id);
    let report = service.update_report(id, &dto).await?;

    Ok(Json(ApiResponse::success(
        Some(report.into()),
        Some("Report updated successfully".to_string()),
        None,
    )))
}

/// List contact form submissions (paginated, newest first)
#[utoipa::path(
    get,
    path = "/api/admin/contact-messages",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Contact messages", body = ApiResponse<Vec<ContactMessageResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - staff access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_contact_messages(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<AdminService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ContactMessageResponseDto>>>> {
    let (items, total) = service
        .list_contact_messages(params.offset(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}
