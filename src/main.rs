mod cache_validator;
mod config;
mod db;
mod db_storage;
mod errors;
mod handlers;
mod ingest_handler;
mod models;
mod normalize;
mod scorers;
mod scoring;
mod services;
mod weights;

use axum::{
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - Database connection.
/// - Caches (recalculation guard, score reads).
/// - HTTP routes and middleware (CORS, Rate Limiting).
///
/// It then starts the Axum server.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "company_scores_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize database connection pool
    let db = Database::new(&config.database_url).await?;
    tracing::info!("Database connection pool established");

    // Recalculation in-flight guard: one global key, TTL bounds a stuck run
    let recalc_guard = Cache::builder()
        .time_to_live(Duration::from_secs(config.recalc_guard_ttl_secs))
        .max_capacity(4)
        .build();
    tracing::info!("Recalculation guard cache initialized");

    // Score read cache (checksummed payloads, see cache_validator)
    let scores_cache = Cache::builder()
        .time_to_live(Duration::from_secs(config.score_cache_ttl_secs))
        .max_capacity(10_000)
        .build();
    tracing::info!(
        "Score read cache initialized ({}s TTL, 10k capacity)",
        config.score_cache_ttl_secs
    );

    // Build application state
    let app_state = Arc::new(crate::handlers::AppState {
        db: db.pool.clone(),
        config: config.clone(),
        recalc_guard,
        scores_cache,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build protected routes with security layers
    let protected_routes = Router::new()
        // Scoring endpoints
        .route(
            "/api/v1/admin/recalculate-scores",
            post(handlers::recalculate_scores),
        )
        .route("/api/v1/companies/top", get(handlers::top_companies))
        .route(
            "/api/v1/companies/:id/scores",
            get(handlers::get_company_scores),
        )
        .route("/api/v1/scores/preview", post(handlers::preview_scores))
        // Metrics ingestion webhook (collectors push fetched snapshots here)
        .route(
            "/api/v1/webhooks/metrics",
            post(ingest_handler::metrics_webhook),
        )
        .layer(
            ServiceBuilder::new()
                // Request size limit: 2MB max payload (prevents memory exhaustion)
                .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20 (prevents DDoS)
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Build final app with health check (bypasses rate limiting)
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
