use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub admin_api_key: String,
    /// Shared secret for the metrics ingestion webhook. Optional; ingestion
    /// is open when unset (a warning is logged at startup).
    pub metrics_webhook_secret: Option<String>,
    /// TTL for the score read cache, seconds.
    pub score_cache_ttl_secs: u64,
    /// TTL for the recalculation in-flight guard, seconds. Bounds how long a
    /// crashed run can block the next one.
    pub recalc_guard_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DB_URL")
                .or_else(|_| std::env::var("DATABASE_URL"))
                .map_err(|_| {
                    anyhow::anyhow!("DB_URL or DATABASE_URL environment variable required")
                })
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DB_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DB_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            admin_api_key: std::env::var("ADMIN_API_KEY")
                .map_err(|_| anyhow::anyhow!("ADMIN_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("ADMIN_API_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            metrics_webhook_secret: std::env::var("METRICS_WEBHOOK_SECRET")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            score_cache_ttl_secs: std::env::var("SCORE_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SCORE_CACHE_TTL_SECS must be a number of seconds"))?,
            recalc_guard_ttl_secs: std::env::var("RECALC_GUARD_TTL_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("RECALC_GUARD_TTL_SECS must be a number of seconds"))?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Database URL: {}...",
            &config.database_url[..20.min(config.database_url.len())]
        );
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("Score cache TTL: {}s", config.score_cache_ttl_secs);
        if config.metrics_webhook_secret.is_none() {
            tracing::warn!(
                "METRICS_WEBHOOK_SECRET not set - metrics webhook will accept unauthenticated requests"
            );
        }

        Ok(config)
    }
}
