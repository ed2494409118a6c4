use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::*;
use crate::features::contact::dtos::ContactMessageResponseDto;
use crate::features::contact::ContactService;
use crate::features::reports::models::{Report, ReportCategory, ReportStatus};

/// Service for staff triage queries and updates
pub struct AdminService {
    pool: PgPool,
    contact_service: Arc<ContactService>,
}

impl AdminService {
    pub fn new(pool: PgPool, contact_service: Arc<ContactService>) -> Self {
        Self {
            pool,
            contact_service,
        }
    }

    // =========================================================================
    // REPORTS
    // =========================================================================

    /// Reports matching the category and status filters, newest first
    async fn fetch_reports(
        &self,
        category: Option<ReportCategory>,
        status: Option<ReportStatus>,
    ) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT * FROM reports
            WHERE ($1::report_category IS NULL OR category = $1)
              AND ($2::report_status IS NULL OR status = $2)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(category)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports for triage: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Triage list. Stats cover the filtered set; search only narrows the list.
    pub async fn list_reports(&self, query: &AdminReportQuery) -> Result<AdminReportListDto> {
        let reports = self.fetch_reports(query.category, query.status).await?;
        let stats = ReportStatsDto::from_reports(&reports);

        let reports = match query.search_needle() {
            Some(needle) => reports
                .into_iter()
                .filter(|r| matches_search(r, &needle))
                .collect(),
            None => reports,
        };

        Ok(AdminReportListDto {
            reports: reports.into_iter().map(Into::into).collect(),
            stats,
        })
    }

    /// Apply the provided fields in one statement. Concurrent updates: last writer wins.
    ///
    /// Blank text clears a column. Leaving `resolved` clears `resolved_at`.
    pub async fn update_report(&self, id: Uuid, dto: &UpdateReportDto) -> Result<Report> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            UPDATE reports
            SET status = COALESCE($2, status),
                assigned_to = CASE
                    WHEN $3::TEXT IS NULL THEN assigned_to
                    ELSE NULLIF(BTRIM($3), '')
                END,
                admin_remarks = CASE
                    WHEN $4::TEXT IS NULL THEN admin_remarks
                    ELSE NULLIF(BTRIM($4), '')
                END,
                resolved_at = CASE
                    WHEN $2::report_status IS NULL THEN resolved_at
                    WHEN $2::report_status = 'resolved' THEN NOW()
                    ELSE NULL
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(dto.status)
        .bind(&dto.assigned_to)
        .bind(&dto.admin_remarks)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update report {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        tracing::info!(
            "Report {} updated: status={}, assigned_to={:?}",
            report.tracking_number,
            report.status,
            report.assigned_to
        );

        Ok(report)
    }

    // =========================================================================
    // CONTACT INBOX
    // =========================================================================

    pub async fn list_contact_messages(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<ContactMessageResponseDto>, i64)> {
        self.contact_service.list(offset, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn insert_report(
        pool: &PgPool,
        tracking_number: &str,
        category: ReportCategory,
        status: ReportStatus,
        title: &str,
    ) -> Uuid {
        sqlx::query_scalar(
            r#"
            INSERT INTO reports (tracking_number, category, status, title, description, city)
            VALUES ($1, $2, $3, $4, 'Reported from the field', 'Bandung')
            RETURNING id
            "#,
        )
        .bind(tracking_number)
        .bind(category)
        .bind(status)
        .bind(title)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn service(pool: PgPool) -> AdminService {
        let contact = Arc::new(ContactService::new(pool.clone()));
        AdminService::new(pool, contact)
    }

    fn status_update(status: ReportStatus) -> UpdateReportDto {
        UpdateReportDto {
            status: Some(status),
            ..Default::default()
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_resolving_sets_resolved_at_and_reopening_clears_it(pool: PgPool) {
        let id = insert_report(
            &pool,
            "CR-2026-000001",
            ReportCategory::Pothole,
            ReportStatus::Submitted,
            "Pothole",
        )
        .await;
        let service = service(pool);

        let resolved = service
            .update_report(id, &status_update(ReportStatus::Resolved))
            .await
            .unwrap();
        assert_eq!(resolved.status, ReportStatus::Resolved);
        assert!(resolved.resolved_at.is_some());
        assert!(resolved.updated_at >= resolved.created_at);

        // A remarks-only update keeps the resolution
        let remarked = service
            .update_report(
                id,
                &UpdateReportDto {
                    admin_remarks: Some("Patched with asphalt".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(remarked.status, ReportStatus::Resolved);
        assert_eq!(remarked.resolved_at, resolved.resolved_at);

        let reopened = service
            .update_report(id, &status_update(ReportStatus::InProgress))
            .await
            .unwrap();
        assert_eq!(reopened.status, ReportStatus::InProgress);
        assert!(reopened.resolved_at.is_none());
        assert_eq!(reopened.admin_remarks.as_deref(), Some("Patched with asphalt"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_blank_text_clears_assignment_and_remarks(pool: PgPool) {
        let id = insert_report(
            &pool,
            "CR-2026-000002",
            ReportCategory::Streetlight,
            ReportStatus::Submitted,
            "Streetlight out",
        )
        .await;
        let service = service(pool);

        let assigned = service
            .update_report(
                id,
                &UpdateReportDto {
                    status: Some(ReportStatus::Assigned),
                    assigned_to: Some("Dinas PU".to_string()),
                    admin_remarks: Some("Crew scheduled".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(assigned.assigned_to.as_deref(), Some("Dinas PU"));
        assert_eq!(assigned.admin_remarks.as_deref(), Some("Crew scheduled"));

        let cleared = service
            .update_report(
                id,
                &UpdateReportDto {
                    assigned_to: Some(String::new()),
                    admin_remarks: Some("  ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.status, ReportStatus::Assigned);
        assert!(cleared.assigned_to.is_none());
        assert!(cleared.admin_remarks.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_unknown_report_is_not_found(pool: PgPool) {
        let result = service(pool)
            .update_report(Uuid::new_v4(), &status_update(ReportStatus::Resolved))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_reports_filters_in_sql_and_counts_before_search(pool: PgPool) {
        insert_report(
            &pool,
            "CR-2026-000010",
            ReportCategory::Pothole,
            ReportStatus::Submitted,
            "Pothole near school",
        )
        .await;
        insert_report(
            &pool,
            "CR-2026-000011",
            ReportCategory::Pothole,
            ReportStatus::Resolved,
            "Pothole on bridge",
        )
        .await;
        insert_report(
            &pool,
            "CR-2026-000012",
            ReportCategory::Garbage,
            ReportStatus::InReview,
            "Garbage pile",
        )
        .await;
        let service = service(pool);

        let potholes = service
            .list_reports(&AdminReportQuery {
                category: Some(ReportCategory::Pothole),
                search: Some("BRIDGE".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(potholes.reports.len(), 1);
        assert_eq!(potholes.reports[0].tracking_number, "CR-2026-000011");
        assert_eq!(
            potholes.stats,
            ReportStatsDto {
                total: 2,
                new: 1,
                in_progress: 0,
                resolved: 1,
            }
        );

        let all = service
            .list_reports(&AdminReportQuery::default())
            .await
            .unwrap();
        assert_eq!(all.stats.total, 3);
        assert_eq!(all.stats.in_progress, 1);
    }
}
