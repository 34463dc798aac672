use crate::db_storage::ScoreStorage;
use crate::errors::AppError;
use crate::handlers::AppState;
use crate::models::{MetricsWebhookPayload, MetricsWebhookResponse};
use crate::scoring::calculate_company_scores;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

/// Metrics Ingestion Webhook
///
/// Receives one company's freshly fetched metrics from the collectors and
/// rescores it inline. The service never fetches anything itself; this is the
/// only write path for raw metrics.
///
/// Expected payload: slug + indexData (github/twitter/onchain sub-objects),
/// plus name/category when the slug is new.
/// Authentication: X-Webhook-Token header must match METRICS_WEBHOOK_SECRET
/// env var (validation is skipped when no secret is configured).
pub async fn metrics_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<MetricsWebhookPayload>,
) -> Result<(StatusCode, Json<MetricsWebhookResponse>), AppError> {
    tracing::info!("Received metrics webhook for company: {}", payload.slug);

    // 1. Validate webhook secret (if configured)
    validate_webhook_secret(&state, &headers)?;

    if payload.slug.trim().is_empty() {
        return Err(AppError::BadRequest("slug must not be empty".to_string()));
    }

    // 2. Upsert the raw metrics snapshot
    let storage = ScoreStorage::new(state.db.clone());
    let company_id = storage
        .upsert_company_metrics(
            &payload.slug,
            payload.name.as_deref(),
            payload.category.as_deref(),
            &payload.index_data,
        )
        .await?;

    // 3. Rescore from the stored row so category fallbacks apply uniformly
    let company = storage.fetch_company(company_id).await?.ok_or_else(|| {
        AppError::InternalError(format!(
            "Company {} vanished between upsert and rescore",
            company_id
        ))
    })?;

    let raw = ScoreStorage::raw_metrics_for(&company);
    let scores = calculate_company_scores(&raw);
    storage.store_company_scores(company_id, &scores).await?;
    state.scores_cache.invalidate(&company_id).await;

    tracing::info!(
        "✓ Ingested metrics and rescored {} → overall {}",
        payload.slug,
        scores.overall_score
    );

    Ok((
        StatusCode::OK,
        Json(MetricsWebhookResponse {
            success: true,
            message: "Metrics stored and scores recalculated".to_string(),
            company_id: Some(company_id),
            scores: Some(scores),
        }),
    ))
}

/// Validate webhook secret from X-Webhook-Token header
fn validate_webhook_secret(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    // If no secret is configured, skip validation (warn was already logged at startup)
    let Some(ref expected_secret) = state.config.metrics_webhook_secret else {
        return Ok(());
    };

    // Extract token from header
    let token = headers
        .get("X-Webhook-Token")
        .or_else(|| headers.get("x-webhook-token"))
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing X-Webhook-Token header".to_string()))?;

    // Constant-time comparison to prevent timing attacks
    if !constant_time_compare(token, expected_secret) {
        tracing::warn!("Invalid webhook token received");
        return Err(AppError::Unauthorized("Invalid webhook token".to_string()));
    }

    Ok(())
}

/// Constant-time string comparison (basic implementation)
/// For production, consider using a crypto library like `subtle`
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.as_bytes()
        .iter()
        .zip(b.as_bytes().iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
