use std::env;
use uuid::Uuid;

use company_scores_api::core::scoring::calculate_company_scores;
use company_scores_api::db::Database;
use company_scores_api::db_storage::ScoreStorage;
use company_scores_api::models::IndexData;

/// Integration smoke test for metric ingestion and score persistence.
/// Marked ignored to avoid running against production by accident; set TEST_DATABASE_URL to run.
#[tokio::test]
#[ignore]
async fn ingest_and_score_smoke_test() -> anyhow::Result<()> {
    let db_url = env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL or DATABASE_URL to run this test"))?;

    let db = Database::new(&db_url).await?;
    let storage = ScoreStorage::new(db.pool.clone());

    // Minimal metrics payload; the scorers are resilient to missing fields.
    let index_data: IndexData = serde_json::from_value(serde_json::json!({
        "github": {
            "totalCommits30d": 60,
            "activeContributors30d": 6,
            "totalStars": 500,
            "repoCount": 20,
            "fetchStatus": "success"
        }
        // No twitter/onchain provided; those components score zero confidence.
    }))?;

    // Use a unique slug to avoid conflicts on repeated runs.
    let slug = format!("smoke-test-{}", Uuid::new_v4());

    let company_id = storage
        .upsert_company_metrics(&slug, Some("Smoke Test Co"), Some("infrastructure"), &index_data)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    assert_ne!(company_id, Uuid::nil());

    let company = storage
        .fetch_company(company_id)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .expect("company was just created");

    let raw = ScoreStorage::raw_metrics_for(&company);
    let scores = calculate_company_scores(&raw);

    storage
        .store_company_scores(company_id, &scores)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let rescored = storage
        .fetch_company(company_id)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .expect("company still present");

    assert_eq!(rescored.overall_score, Some(scores.overall_score));
    assert_eq!(rescored.trend.as_deref(), Some(scores.trend.as_str()));
    assert!(rescored.scored_at.is_some());

    Ok(())
}
