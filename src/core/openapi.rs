use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::auth::{dto as auth_dto, handler as auth_handler, model as auth_model};
use crate::features::badges::{dtos as badges_dtos, handlers as badges_handlers};
use crate::features::contact::{dtos as contact_dtos, handlers as contact_handlers};
use crate::features::education::{dtos as education_dtos, handlers as education_handlers};
use crate::features::leaderboard::{dtos as leaderboard_dtos, handlers as leaderboard_handlers};
use crate::features::profiles::{dtos as profiles_dtos, handlers::profile_handler};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handler::get_me,
        // Profile
        profile_handler::get_profile,
        profile_handler::update_profile,
        // Reports
        reports_handlers::submit_report,
        reports_handlers::track_report,
        reports_handlers::list_my_reports,
        reports_handlers::get_report,
        reports_handlers::reverse_geocode,
        // Admin
        admin_handlers::list_reports,
        admin_handlers::update_report,
        admin_handlers::list_contact_messages,
        // Leaderboard and badges (public catalog)
        leaderboard_handlers::get_leaderboard,
        badges_handlers::list_badges,
        badges_handlers::list_my_badges,
        // Education
        education_handlers::list_categories,
        education_handlers::list_questions,
        education_handlers::submit_answer,
        education_handlers::get_progress,
        // Contact (public)
        contact_handlers::create_contact_message,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth_model::AppRole,
            auth_dto::MeResponseDto,
            ApiResponse<auth_dto::MeResponseDto>,
            // Profile
            profiles_dtos::ProfileResponseDto,
            profiles_dtos::UpdateProfileDto,
            ApiResponse<profiles_dtos::ProfileResponseDto>,
            // Reports
            reports_models::ReportCategory,
            reports_models::ReportSeverity,
            reports_models::ReportStatus,
            reports_dtos::TimelineStepDto,
            reports_dtos::StatusTimelineDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::SubmitReportDto,
            reports_dtos::SubmitReportResponseDto,
            reports_dtos::GeocodedAddressDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::SubmitReportResponseDto>,
            ApiResponse<reports_dtos::GeocodedAddressDto>,
            // Admin
            admin_dtos::ReportStatsDto,
            admin_dtos::AdminReportListDto,
            admin_dtos::UpdateReportDto,
            ApiResponse<admin_dtos::AdminReportListDto>,
            // Leaderboard
            leaderboard_dtos::LeaderboardEntryDto,
            ApiResponse<Vec<leaderboard_dtos::LeaderboardEntryDto>>,
            // Badges
            badges_dtos::BadgeResponseDto,
            badges_dtos::EarnedBadgeResponseDto,
            ApiResponse<Vec<badges_dtos::BadgeResponseDto>>,
            ApiResponse<Vec<badges_dtos::EarnedBadgeResponseDto>>,
            // Education
            education_dtos::QuizCategoryResponseDto,
            education_dtos::QuizQuestionDto,
            education_dtos::SubmitAnswerDto,
            education_dtos::AnswerResultDto,
            education_dtos::CategoryProgressDto,
            ApiResponse<Vec<education_dtos::QuizCategoryResponseDto>>,
            ApiResponse<Vec<education_dtos::QuizQuestionDto>>,
            ApiResponse<education_dtos::AnswerResultDto>,
            ApiResponse<Vec<education_dtos::CategoryProgressDto>>,
            // Contact
            contact_dtos::CreateContactMessageDto,
            contact_dtos::ContactMessageResponseDto,
            ApiResponse<contact_dtos::ContactMessageResponseDto>,
            ApiResponse<Vec<contact_dtos::ContactMessageResponseDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Authenticated session"),
        (name = "profile", description = "Citizen profile"),
        (name = "reports", description = "Civic issue reports and public tracking"),
        (name = "admin", description = "Report triage and contact inbox (staff only)"),
        (name = "leaderboard", description = "Points leaderboard (public)"),
        (name = "badges", description = "Badge catalog and earned badges"),
        (name = "education", description = "Civic education quizzes"),
        (name = "contact", description = "Contact form (public)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Civic Engage API",
        version = "0.1.0",
        description = "API documentation for Civic Engage",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_public_and_protected_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/reports",
            "/api/reports/track/{tracking_number}",
            "/api/admin/reports/{id}",
            "/api/leaderboard",
            "/api/quiz/questions/{id}/answer",
            "/api/contact",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }

        let schemes = doc
            .components
            .as_ref()
            .map(|c| c.security_schemes.contains_key("bearer_auth"));
        assert_eq!(schemes, Some(true));
    }

    #[test]
    fn test_swagger_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Civic Engage (staging)".to_string(),
            version: "2.0.0".to_string(),
            description: "Staging".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Civic Engage (staging)");
        assert_eq!(doc.info.version, "2.0.0");
    }
}
