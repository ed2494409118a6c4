use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::contact::dtos::{ContactMessageResponseDto, CreateContactMessageDto};
use crate::features::contact::services::ContactService;
use crate::shared::types::ApiResponse;

/// Submit the public contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateContactMessageDto,
    responses(
        (status = 201, description = "Message received", body = ApiResponse<ContactMessageResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "contact"
)]
pub async fn create_contact_message(
    State(service): State<Arc<ContactService>>,
    ValidatedJson(dto): ValidatedJson<CreateContactMessageDto>,
) -> Result<(StatusCode, Json<ApiResponse<ContactMessageResponseDto>>)> {
    let message = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(message),
            Some("Thank you! Your message has been received.".to_string()),
            None,
        )),
    ))
}
