//! File-based batch scorer: one JSON file per company, scores attached in place.
use anyhow::{Context, Result};
use company_scores_api::models::{IndexData, RawMetrics};
use company_scores_api::scoring::calculate_company_scores;
use std::fs;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("=== Batch Company Scoring ===\n");

    // Directory of company JSON files: first CLI arg, COMPANIES_DIR, or ./companies
    let dir = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("COMPANIES_DIR").ok())
        .unwrap_or_else(|| "companies".to_string());

    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read directory {}", dir))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let total = paths.len();
    let mut success_count = 0;
    let mut fail_count = 0;

    // Process each company file
    for (idx, path) in paths.iter().enumerate() {
        println!("[{}/{}] Scoring {}", idx + 1, total, path.display());

        match score_file(path) {
            Ok(overall) => {
                println!("  ✓ Scored successfully - overall: {}", overall);
                success_count += 1;
            }
            Err(e) => {
                println!("  ✗ Failed: {}", e);
                fail_count += 1;
            }
        }
    }

    println!("\n=== Batch Scoring Complete ===");
    println!("Total processed: {}", total);
    println!("✓ Success: {}", success_count);
    println!("✗ Failed: {}", fail_count);
    if total > 0 {
        println!(
            "Success rate: {:.1}%",
            (success_count as f64 / total as f64) * 100.0
        );
    }

    Ok(())
}

/// Score one company file and write it back with a `scores` key attached.
///
/// Unknown keys in the record are preserved; only `scores` is replaced.
fn score_file(path: &Path) -> Result<i32> {
    let content = fs::read_to_string(path)?;
    let mut record: serde_json::Value =
        serde_json::from_str(&content).context("Record is not valid JSON")?;

    let category = record
        .get("category")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let index_data: IndexData = record
        .get("indexData")
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .context("indexData does not match the expected shape")?
        .unwrap_or_default();

    let raw = RawMetrics {
        category,
        index_data,
    };
    let scores = calculate_company_scores(&raw);
    let overall = scores.overall_score;

    record["scores"] = serde_json::to_value(&scores)?;
    fs::write(path, serde_json::to_string_pretty(&record)?)?;

    Ok(overall)
}
