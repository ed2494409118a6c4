mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::auth::{routes as auth_routes, JwtValidator};
use crate::features::badges::{routes as badges_routes, BadgeService};
use crate::features::contact::{routes as contact_routes, ContactService};
use crate::features::education::{routes as education_routes, QuizService};
use crate::features::leaderboard::{routes as leaderboard_routes, LeaderboardService};
use crate::features::profiles::{routes as profiles_routes, ProfileService};
use crate::features::reports::{routes as reports_routes, GeocodingService, ReportService};
use crate::modules::storage::{MinIOClient, ObjectStore};
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env before the logger so RUST_LOG is honoured
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let jwt_validator = Arc::new(JwtValidator::new(&config.auth));
    tracing::info!("Auth configuration initialized");

    let minio_client = MinIOClient::new(config.minio.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize MinIO client: {}", e))?;
    tracing::info!(
        "MinIO client initialized for bucket: {}",
        minio_client.bucket_name()
    );
    let object_store: Arc<dyn ObjectStore> = Arc::new(minio_client);

    let geocoding_service = Arc::new(
        GeocodingService::new(&config.geocoding)
            .map_err(|e| anyhow::anyhow!("Failed to initialize geocoding client: {}", e))?,
    );

    let report_service = Arc::new(ReportService::new(
        pool.clone(),
        object_store,
        geocoding_service,
    ));
    let profile_service = Arc::new(ProfileService::new(pool.clone()));
    let contact_service = Arc::new(ContactService::new(pool.clone()));
    let admin_service = Arc::new(AdminService::new(
        pool.clone(),
        Arc::clone(&contact_service),
    ));
    let leaderboard_service = Arc::new(LeaderboardService::new(pool.clone()));
    let badge_service = Arc::new(BadgeService::new(pool.clone()));
    let quiz_service = Arc::new(QuizService::new(pool.clone()));
    tracing::info!("Services initialized");

    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes())
        .merge(profiles_routes::routes(profile_service))
        .merge(reports_routes::protected_routes(Arc::clone(&report_service)))
        .merge(badges_routes::protected_routes(Arc::clone(&badge_service)))
        .merge(education_routes::protected_routes(Arc::clone(&quiz_service)))
        .nest("/api/admin", admin_routes::routes(admin_service))
        .route_layer(axum::middleware::from_fn_with_state(
            jwt_validator,
            middleware::auth_middleware,
        ));

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(reports_routes::public_routes(report_service))
        .merge(leaderboard_routes::routes(leaderboard_service))
        .merge(badges_routes::public_routes(badge_service))
        .merge(education_routes::public_routes(quiz_service))
        .merge(contact_routes::routes(contact_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or keep a client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
