//! Script to import company metric JSON files into the companies table.

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::fs;

/// Main entry point for the import script.
///
/// Reads every JSON file in the given directory (default `companies/`) and
/// upserts a row per file keyed on slug. Files without a slug are skipped.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Database connection
    let database_url = env::var("DB_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .expect("DB_URL or DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    let dir = env::args().nth(1).unwrap_or_else(|| "companies".to_string());
    tracing::info!("Connected to database. Importing companies from {}...", dir);

    let mut imported = 0;
    let mut skipped = 0;

    for entry in fs::read_dir(&dir)? {
        let path = entry?.path();
        if !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }

        let content = fs::read_to_string(&path)?;
        let record: serde_json::Value = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Skipping {}: invalid JSON ({})", path.display(), e);
                skipped += 1;
                continue;
            }
        };

        let Some(slug) = record.get("slug").and_then(|v| v.as_str()) else {
            tracing::warn!("Skipping {}: no slug field", path.display());
            skipped += 1;
            continue;
        };

        let name = record.get("name").and_then(|v| v.as_str()).unwrap_or(slug);
        let category = record
            .get("category")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        let index_data = record
            .get("indexData")
            .cloned()
            .unwrap_or_else(|| serde_json::json!({}));

        sqlx::query(
            r#"
            INSERT INTO companies (slug, name, category, index_data, active)
            VALUES ($1, $2, $3, $4, true)
            ON CONFLICT (slug)
            DO UPDATE SET
                name = EXCLUDED.name,
                category = EXCLUDED.category,
                index_data = EXCLUDED.index_data,
                updated_at = NOW()
            "#,
        )
        .bind(slug)
        .bind(name)
        .bind(category)
        .bind(index_data)
        .execute(&pool)
        .await?;

        imported += 1;
    }

    tracing::info!(
        "Import complete. Imported {} companies, skipped {}.",
        imported,
        skipped
    );

    Ok(())
}
