mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::access::{route_guard_middleware, RoleLookup, RouteGuard};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::auth::{
    routes as auth_routes, AuthProvider, AuthService, AuthSettings, BackendAuthClient,
    JwtValidator,
};
use crate::features::branches::{routes as branches_routes, BranchService, PgBranchRepository};
use crate::features::folders::{routes as folders_routes, FolderService, PgFolderRepository};
use crate::features::notifications::{
    routes as notifications_routes, NotificationService, PgNotificationRepository,
};
use crate::features::profiles::{
    routes as profiles_routes, PgProfileRepository, ProfileRepository, ProfileService,
};
use crate::features::resources::{
    routes as resources_routes, PgResourceRepository, ResourceRepository, ResourceService,
};
use crate::modules::storage::{ObjectStore, StorageClient};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::{ServeDir, ServeFile};
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

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Starting engportal-core: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    if config.database.run_migrations {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
        tracing::info!("Database migrations completed successfully");
    } else {
        tracing::info!("Database migrations skipped (DB_RUN_MIGRATIONS=false)");
    }

    // Session tokens are validated locally with the backend's shared secret
    let jwt_validator = Arc::new(JwtValidator::new(
        &config.auth.jwt_secret,
        config.auth.jwt_audience.clone(),
        config.auth.jwt_leeway,
    ));

    let storage: Arc<dyn ObjectStore> = Arc::new(
        StorageClient::new(config.storage.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize storage client: {}", e))?,
    );

    // Repositories
    let pg_profiles = Arc::new(PgProfileRepository::new(pool.clone()));
    let profile_repository: Arc<dyn ProfileRepository> = pg_profiles.clone();
    let role_lookup: Arc<dyn RoleLookup> = pg_profiles;
    let resource_repository: Arc<dyn ResourceRepository> =
        Arc::new(PgResourceRepository::new(pool.clone()));
    let folder_repository = Arc::new(PgFolderRepository::new(pool.clone()));

    // Services
    let auth_provider: Arc<dyn AuthProvider> = Arc::new(BackendAuthClient::new(
        &config.auth,
        config.backend.anon_key.clone(),
    ));
    let auth_service = Arc::new(AuthService::new(
        auth_provider,
        Arc::clone(&profile_repository),
        AuthSettings::new(
            config.auth.session_cookie.clone(),
            &config.app.frontend_url,
        ),
    ));
    let profile_service = Arc::new(ProfileService::new(
        Arc::clone(&profile_repository),
        Arc::clone(&resource_repository),
    ));
    let resource_service = Arc::new(ResourceService::new(
        Arc::clone(&resource_repository),
        folder_repository.clone(),
        Arc::clone(&storage),
    ));
    let folder_service = Arc::new(FolderService::new(
        folder_repository,
        Arc::clone(&resource_repository),
    ));
    let branch_service = Arc::new(BranchService::new(Arc::new(PgBranchRepository::new(
        pool.clone(),
    ))));
    let notification_service = Arc::new(NotificationService::new(Arc::new(
        PgNotificationRepository::new(pool.clone()),
    )));
    let admin_service = Arc::new(AdminService::new(
        Arc::clone(&resource_repository),
        Arc::clone(&profile_repository),
    ));
    tracing::info!("Services initialized");

    let route_guard = Arc::new(RouteGuard::new(
        jwt_validator,
        role_lookup,
        config.auth.session_cookie.clone(),
    ));

    // Build application router with dynamic swagger config
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

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public, session and admin surfaces share one router; the route guard decides per path
    let api_routes = Router::new()
        .merge(auth_routes::public_routes(Arc::clone(&auth_service)))
        .merge(auth_routes::protected_routes(auth_service))
        .merge(profiles_routes::routes(profile_service))
        .merge(resources_routes::routes(Arc::clone(&resource_service)))
        .merge(resources_routes::admin_routes(resource_service))
        .merge(folders_routes::routes(Arc::clone(&folder_service)))
        .merge(folders_routes::admin_routes(folder_service))
        .merge(branches_routes::routes(Arc::clone(&branch_service)))
        .merge(branches_routes::admin_routes(branch_service))
        .merge(notifications_routes::routes(Arc::clone(
            &notification_service,
        )))
        .merge(notifications_routes::admin_routes(notification_service))
        .nest("/api/admin", admin_routes::routes(admin_service));

    let mut app = Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route);

    // Frontend pages sit behind the same guard as the API
    if let Some(static_dir) = &config.app.static_dir {
        tracing::info!("Serving frontend from {}", static_dir);
        let index = format!("{}/index.html", static_dir.trim_end_matches('/'));
        app = app.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)));
    }

    let app = app
        .layer(axum::middleware::from_fn_with_state(
            route_guard,
            route_guard_middleware,
        ))
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
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
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
    socket.set_nodelay(true)?;
    socket.set_tcp_keepalive(
        &socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60)),
    )?;
    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
