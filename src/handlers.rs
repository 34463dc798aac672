use crate::cache_validator::ValidatedScoresEntry;
use crate::config::Config;
use crate::db_storage::ScoreStorage;
use crate::errors::AppError;
use crate::ingest_handler::constant_time_compare;
use crate::models::*;
use crate::scoring::calculate_company_scores;
use crate::services::CompanyService;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use moka::future::Cache;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Cache key for the single global recalculation guard.
const RECALC_GUARD_KEY: &str = "recalculate-scores";

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
    /// In-flight guard preventing concurrent recalculation runs. TTL-bounded
    /// so a crashed run cannot block the next one forever.
    pub recalc_guard: Cache<String, i64>,
    /// Score read cache: company id -> checksummed serialized response.
    pub scores_cache: Cache<Uuid, String>,
}

/// Health check endpoint.
///
/// Returns the service status, version, and health information.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "company-scores-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /api/v1/admin/recalculate-scores
///
/// Recomputes and persists scores for every active company. Requires the
/// admin API key in the `X-Admin-Key` header. Only one run may be in flight
/// at a time; concurrent requests get 409.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `headers` - Request headers carrying the admin key.
///
/// # Returns
///
/// * `Result<Json<RecalculateResponse>, AppError>` - Run summary or an error.
pub async fn recalculate_scores(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<RecalculateResponse>, AppError> {
    validate_admin_key(&state.config, &headers)?;

    if state.recalc_guard.get(RECALC_GUARD_KEY).await.is_some() {
        return Err(AppError::Conflict(
            "A recalculation run is already in progress".to_string(),
        ));
    }
    state
        .recalc_guard
        .insert(RECALC_GUARD_KEY.to_string(), chrono::Utc::now().timestamp())
        .await;

    // Always release the guard, also when loading companies fails.
    let result = run_recalculation(&state).await;
    state.recalc_guard.invalidate(RECALC_GUARD_KEY).await;

    result.map(Json)
}

async fn run_recalculation(state: &Arc<AppState>) -> Result<RecalculateResponse, AppError> {
    let started = Instant::now();
    let storage = ScoreStorage::new(state.db.clone());

    let companies = storage.fetch_active_companies().await?;
    tracing::info!("Recalculating scores for {} companies", companies.len());

    let mut succeeded = 0;
    let mut failed = 0;

    for company in &companies {
        let raw = ScoreStorage::raw_metrics_for(company);
        let scores = calculate_company_scores(&raw);

        match storage.store_company_scores(company.id, &scores).await {
            Ok(()) => {
                succeeded += 1;
                state.scores_cache.invalidate(&company.id).await;
            }
            Err(e) => {
                tracing::error!("✗ Failed to persist scores for {}: {}", company.slug, e);
                failed += 1;
                // Continue with remaining companies even if one write fails
            }
        }
    }

    let duration_ms = started.elapsed().as_millis() as u64;
    tracing::info!(
        "Recalculation complete: {} processed, {} succeeded, {} failed in {}ms",
        companies.len(),
        succeeded,
        failed,
        duration_ms
    );

    Ok(RecalculateResponse {
        success: failed == 0,
        processed: companies.len(),
        succeeded,
        failed,
        duration_ms,
    })
}

/// GET /api/v1/companies/:id/scores
///
/// Returns the persisted scores for one company, served through the
/// integrity-validated read cache.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `id` - The UUID of the company.
///
/// # Returns
///
/// * `Result<Json<CompanyScoresResponse>, AppError>` - The scores or an error.
pub async fn get_company_scores(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyScoresResponse>, AppError> {
    // 1. Check cache; invalid entries fall through to the database
    if let Some(cached) = state.scores_cache.get(&id).await {
        if let Some(data) = ValidatedScoresEntry::deserialize_and_validate(&cached) {
            if let Ok(response) = serde_json::from_str::<CompanyScoresResponse>(&data) {
                return Ok(Json(response));
            }
        }
        state.scores_cache.invalidate(&id).await;
    }

    // 2. Read from database
    let service = CompanyService::new(state.db.clone());
    let company = service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company with id {} not found", id)))?;

    let scores: CompanyScores = company
        .scores
        .clone()
        .and_then(|v| serde_json::from_value(v).ok())
        .ok_or_else(|| {
            AppError::NotFound(format!("Company {} has not been scored yet", company.slug))
        })?;

    let response = CompanyScoresResponse {
        company_id: company.id,
        name: company.name,
        slug: company.slug,
        category: company.category,
        scores,
        scored_at: company.scored_at,
    };

    // 3. Update cache
    if let Some(entry) = ValidatedScoresEntry::from_response(&response) {
        state.scores_cache.insert(id, entry.serialize()).await;
    }

    Ok(Json(response))
}

/// GET /api/v1/companies/top?limit=N
///
/// Ranked listing of scored companies, best overall score first.
pub async fn top_companies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopCompaniesQuery>,
) -> Result<Json<Vec<RankedCompany>>, AppError> {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);

    let service = CompanyService::new(state.db.clone());
    let ranked = service.list_top(limit).await?;

    Ok(Json(ranked))
}

/// POST /api/v1/scores/preview
///
/// Computes scores from a submitted raw metrics payload without persisting
/// anything. A straight passthrough to the pure scoring core, useful for
/// inspecting what a metrics snapshot would score before ingesting it.
pub async fn preview_scores(
    Json(raw): Json<RawMetrics>,
) -> Result<Json<CompanyScores>, AppError> {
    Ok(Json(calculate_company_scores(&raw)))
}

/// Validate the admin API key from the X-Admin-Key header.
fn validate_admin_key(config: &Config, headers: &HeaderMap) -> Result<(), AppError> {
    let key = headers
        .get("X-Admin-Key")
        .or_else(|| headers.get("x-admin-key"))
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing X-Admin-Key header".to_string()))?;

    if !constant_time_compare(key, &config.admin_api_key) {
        tracing::warn!("Invalid admin key received");
        return Err(AppError::Unauthorized("Invalid admin key".to_string()));
    }

    Ok(())
}
