use std::sync::Arc;

use chrono::{Datelike, Utc};
use futures::future::join_all;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    extension_for_image_type, CreateReportForm, GeocodedAddressDto, ReportImage,
};
use crate::features::reports::models::{format_tracking_number, NewReport, Report};
use crate::features::reports::services::GeocodingService;
use crate::modules::storage::ObjectStore;
use crate::shared::validation::{normalize_tracking_number, validate_coordinates};

/// Outcome of storing a submission's images
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Public URLs, in the order the parts were received
    pub urls: Vec<String>,
    pub failed: usize,
}

/// Upload images concurrently. A failed upload is logged and left out.
pub async fn upload_report_images(
    store: &dyn ObjectStore,
    user_id: Uuid,
    images: Vec<ReportImage>,
) -> UploadOutcome {
    let uploads = images.into_iter().map(|image| async move {
        let path = format!(
            "reports/{}/{}.{}",
            user_id,
            Uuid::new_v4(),
            extension_for_image_type(&image.content_type)
        );
        let result = store
            .put_public(&path, image.data, &image.content_type)
            .await;
        (image.file_name, result)
    });

    let mut outcome = UploadOutcome::default();
    for (file_name, result) in join_all(uploads).await {
        match result {
            Ok(url) => outcome.urls.push(url),
            Err(e) => {
                tracing::warn!("Skipping image '{}' for user {}: {}", file_name, user_id, e);
                outcome.failed += 1;
            }
        }
    }
    outcome
}

/// Fill address fields the reporter left empty. Typed values always win.
pub fn apply_geocoded_address(form: &mut CreateReportForm, geocoded: GeocodedAddressDto) {
    if form.address.is_none() {
        form.address = geocoded.address.or(geocoded.display_name);
    }
    if form.city.is_none() {
        form.city = geocoded.city;
    }
    if form.state.is_none() {
        form.state = geocoded.state;
    }
    if form.postal_code.is_none() {
        form.postal_code = geocoded.postal_code;
    }
}

/// Service for citizen report operations
pub struct ReportService {
    pool: PgPool,
    store: Arc<dyn ObjectStore>,
    geocoding: Arc<GeocodingService>,
}

impl ReportService {
    pub fn new(
        pool: PgPool,
        store: Arc<dyn ObjectStore>,
        geocoding: Arc<GeocodingService>,
    ) -> Self {
        Self {
            pool,
            store,
            geocoding,
        }
    }

    pub fn geocoding(&self) -> &GeocodingService {
        &self.geocoding
    }

    /// Submit a report. Returns the stored row and the number of images that
    /// could not be uploaded.
    pub async fn submit(
        &self,
        user_id: Uuid,
        mut form: CreateReportForm,
        images: Vec<ReportImage>,
    ) -> Result<(Report, usize)> {
        let category = form
            .category
            .ok_or_else(|| AppError::Validation("category is required".to_string()))?;
        let coordinates =
            validate_coordinates(form.latitude, form.longitude).map_err(AppError::Validation)?;

        if let (Some((lat, lon)), None) = (coordinates, form.city.as_ref()) {
            if let Some(geocoded) = self.geocoding.reverse_best_effort(lat, lon).await {
                apply_geocoded_address(&mut form, geocoded);
            }
        }

        let uploads = upload_report_images(self.store.as_ref(), user_id, images).await;

        let new_report = NewReport {
            user_id: Some(user_id),
            category,
            severity: form.severity.unwrap_or_default(),
            title: form.title,
            description: form.description,
            address: form.address,
            city: form.city,
            state: form.state,
            postal_code: form.postal_code,
            latitude: coordinates.map(|(lat, _)| lat),
            longitude: coordinates.map(|(_, lon)| lon),
            image_urls: uploads.urls,
        };

        let report = self.insert(&new_report).await?;

        tracing::info!(
            "Report {} submitted by user {} ({} images, {} failed)",
            report.tracking_number,
            user_id,
            report.image_urls.len(),
            uploads.failed
        );

        Ok((report, uploads.failed))
    }

    /// Allocate a tracking number and insert in one transaction
    async fn insert(&self, data: &NewReport) -> Result<Report> {
        let mut tx = self.pool.begin().await?;

        let sequence: i64 = sqlx::query_scalar("SELECT nextval('report_tracking_seq')")
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get next tracking sequence value: {:?}", e);
                AppError::Database(e)
            })?;
        let tracking_number = format_tracking_number(Utc::now().year(), sequence);

        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (
                tracking_number, user_id, category, severity, title, description,
                address, city, state, postal_code, latitude, longitude, image_urls
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&tracking_number)
        .bind(data.user_id)
        .bind(data.category)
        .bind(data.severity)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.postal_code)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(&data.image_urls)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert report {}: {:?}", tracking_number, e);
            AppError::Database(e)
        })?;

        tx.commit().await?;
        Ok(report)
    }

    /// Public lookup. Malformed numbers never reach the database.
    pub async fn get_by_tracking_number(&self, tracking_number: &str) -> Result<Report> {
        let not_found = || AppError::NotFound("Report not found".to_string());
        let normalized = normalize_tracking_number(tracking_number).ok_or_else(not_found)?;

        sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE tracking_number = $1")
            .bind(&normalized)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Report> {
        sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))
    }

    /// The caller's reports, newest first
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Report>> {
        let reports = sqlx::query_as::<_, Report>(
            "SELECT * FROM reports WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GeocodingConfig;
    use crate::features::reports::models::{ReportCategory, ReportSeverity, ReportStatus};
    use crate::shared::validation::TRACKING_NUMBER_REGEX;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Stores everything except paths whose image payload is `b"fail"`
    struct FakeStore {
        paths: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ObjectStore for FakeStore {
        async fn put_public(
            &self,
            path: &str,
            data: Vec<u8>,
            _content_type: &str,
        ) -> std::result::Result<String, AppError> {
            if data == b"fail" {
                return Err(AppError::Internal("bucket unavailable".to_string()));
            }
            self.paths.lock().unwrap().push(path.to_string());
            Ok(format!("http://cdn.test/{}", String::from_utf8_lossy(&data)))
        }
    }

    fn image(name: &str, data: &[u8]) -> ReportImage {
        ReportImage {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            data: data.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_upload_keeps_order_and_skips_failures() {
        let store = FakeStore {
            paths: Mutex::new(Vec::new()),
        };
        let user_id = Uuid::new_v4();
        let images = vec![
            image("a.png", b"a"),
            image("b.png", b"fail"),
            image("c.png", b"c"),
        ];

        let outcome = upload_report_images(&store, user_id, images).await;

        assert_eq!(
            outcome.urls,
            vec!["http://cdn.test/a".to_string(), "http://cdn.test/c".to_string()]
        );
        assert_eq!(outcome.failed, 1);

        let paths = store.paths.lock().unwrap();
        assert_eq!(paths.len(), 2);
        let prefix = format!("reports/{}/", user_id);
        assert!(paths.iter().all(|p| p.starts_with(&prefix) && p.ends_with(".png")));
    }

    #[tokio::test]
    async fn test_upload_with_no_images() {
        let store = FakeStore {
            paths: Mutex::new(Vec::new()),
        };
        let outcome = upload_report_images(&store, Uuid::new_v4(), Vec::new()).await;
        assert_eq!(outcome, UploadOutcome::default());
    }

    #[test]
    fn test_geocoded_address_only_fills_missing_fields() {
        let mut form = CreateReportForm {
            address: Some("Near the mosque".to_string()),
            ..Default::default()
        };
        let geocoded = GeocodedAddressDto {
            display_name: Some("Jalan Merdeka, Jakarta".to_string()),
            address: Some("Jalan Merdeka".to_string()),
            city: Some("Jakarta Pusat".to_string()),
            state: Some("DKI Jakarta".to_string()),
            postal_code: Some("10110".to_string()),
            country_code: Some("id".to_string()),
        };

        apply_geocoded_address(&mut form, geocoded);

        assert_eq!(form.address.as_deref(), Some("Near the mosque"));
        assert_eq!(form.city.as_deref(), Some("Jakarta Pusat"));
        assert_eq!(form.state.as_deref(), Some("DKI Jakarta"));
        assert_eq!(form.postal_code.as_deref(), Some("10110"));
    }

    fn service(pool: PgPool) -> ReportService {
        let geocoding = GeocodingService::new(&GeocodingConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            user_agent: "civic-engage-test".to_string(),
            timeout: Duration::from_millis(200),
        })
        .unwrap();
        let store = FakeStore {
            paths: Mutex::new(Vec::new()),
        };
        ReportService::new(pool, Arc::new(store), Arc::new(geocoding))
    }

    fn form(title: &str) -> CreateReportForm {
        CreateReportForm {
            category: Some(ReportCategory::Pothole),
            title: title.to_string(),
            description: "Deep hole in front of the market".to_string(),
            city: Some("Bandung".to_string()),
            ..Default::default()
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_submit_stores_submitted_report(pool: PgPool) {
        let service = service(pool);
        let user_id = Uuid::new_v4();
        let images = vec![image("a.png", b"a"), image("b.png", b"fail")];

        let (report, failed) = service
            .submit(user_id, form("Pothole on Jl. Braga"), images)
            .await
            .unwrap();

        assert_eq!(report.status, ReportStatus::Submitted);
        assert_eq!(report.severity, ReportSeverity::Medium);
        assert_eq!(report.user_id, Some(user_id));
        assert_eq!(report.image_urls, vec!["http://cdn.test/a".to_string()]);
        assert_eq!(failed, 1);
        assert!(report.resolved_at.is_none());

        assert!(TRACKING_NUMBER_REGEX.is_match(&report.tracking_number));
        let year_prefix = format!("CR-{}-", Utc::now().year());
        assert!(report.tracking_number.starts_with(&year_prefix));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_tracking_numbers_are_unique_and_trackable(pool: PgPool) {
        let service = service(pool);
        let user_id = Uuid::new_v4();

        let (first, _) = service
            .submit(user_id, form("Broken streetlight"), Vec::new())
            .await
            .unwrap();
        let (second, _) = service
            .submit(user_id, form("Overflowing bin"), Vec::new())
            .await
            .unwrap();
        assert_ne!(first.tracking_number, second.tracking_number);

        let tracked = service
            .get_by_tracking_number(&first.tracking_number.to_lowercase())
            .await
            .unwrap();
        assert_eq!(tracked.id, first.id);

        let unknown = service.get_by_tracking_number("CR-1999-999999").await;
        assert!(matches!(unknown, Err(AppError::NotFound(_))));

        let mine = service.list_by_user(user_id).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, second.id);
    }

    #[tokio::test]
    async fn test_submit_requires_category() {
        let service = service(crate::shared::test_helpers::lazy_pool());
        let without_category = CreateReportForm {
            category: None,
            ..form("Graffiti")
        };

        let result = service
            .submit(Uuid::new_v4(), without_category, Vec::new())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
