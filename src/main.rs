mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::services::{AuthService, TokenService};
use crate::features::plans::routes as plans_routes;
use crate::features::plans::{DownloadService, PlanService, PurchaseService};
use crate::features::profile::{routes as profile_routes, ProfileService};
use crate::features::stats::{routes as stats_routes, StatsService};
use crate::modules::storage::{ContentStore, LocalDiskStore};
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
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
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Initialize local-disk content store
    let disk_store = LocalDiskStore::new(&config.storage)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize content store: {}", e))?;
    let uploads_root = disk_store.root().to_path_buf();
    let store: Arc<dyn ContentStore> = Arc::new(disk_store);
    tracing::info!("Content store initialized at {}", uploads_root.display());

    // Initialize auth services
    let token_service = Arc::new(TokenService::new(&config.auth));
    let auth_service = Arc::new(AuthService::new(pool.clone(), Arc::clone(&token_service)));
    tracing::info!("Auth service initialized");

    // Seed the first admin account when none exists yet
    if let (Some(email), Some(password)) = (
        config.auth.bootstrap_email.as_deref(),
        config.auth.bootstrap_password.as_deref(),
    ) {
        auth_service
            .ensure_bootstrap_admin(email, password)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bootstrap admin account: {}", e))?;
    } else {
        tracing::info!("No bootstrap admin configured (ADMIN_EMAIL/ADMIN_PASSWORD unset)");
    }

    // Initialize plan services
    let plan_service = Arc::new(PlanService::new(pool.clone(), Arc::clone(&store)));
    let download_service = Arc::new(DownloadService::new(pool.clone()));
    let purchase_service = Arc::new(PurchaseService::new(pool.clone()));
    tracing::info!("Plan services initialized");

    // Initialize Profile Service
    let profile_service = Arc::new(ProfileService::new(pool.clone(), Arc::clone(&store)));
    tracing::info!("Profile service initialized");

    // Initialize Stats Service
    let stats_service = Arc::new(StatsService::new(pool.clone()));
    tracing::info!("Stats service initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
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

    // Protected routes (require a bearer token)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes())
        .merge(plans_routes::admin_routes(
            Arc::clone(&plan_service),
            Arc::clone(&purchase_service),
        ))
        .merge(profile_routes::routes(profile_service))
        .merge(stats_routes::routes(stats_service))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&auth_service),
            middleware::auth_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(auth_service))
        .merge(plans_routes::public_routes(
            plan_service,
            download_service,
            purchase_service,
        ));

    // Stored plan images/documents served as static files
    let uploads = Router::new().nest_service(
        &config.storage.public_base_path,
        ServeDir::new(uploads_root),
    );

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .merge(uploads)
        // Routes with larger multipart forms raise this per-route
        .layer(axum::extract::DefaultBodyLimit::max(
            config.app.max_request_body_size,
        ))
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
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
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

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
