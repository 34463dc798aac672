use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============ Raw Metrics (scoring input) ============

/// Outcome of the upstream fetch that produced a metrics sub-object.
///
/// Anything other than `Success` means the numbers in that sub-object cannot
/// be trusted as "real zeros" and the corresponding scorer short-circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    /// Fetch completed and the fields reflect what the source reported.
    Success,
    /// Fetch errored out; field values are meaningless.
    Failed,
    /// Fetch has not completed yet.
    #[default]
    Pending,
}

impl FetchStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchStatus::Success)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchStatus::Failed)
    }
}

/// GitHub activity snapshot for one company.
///
/// Every numeric field is independently nullable: the fetcher reports `null`
/// for anything the source did not expose.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GithubMetrics {
    /// Commits across all tracked repos in the last 30 days.
    pub total_commits_30d: Option<i64>,
    /// Distinct contributors active in the last 30 days.
    pub active_contributors_30d: Option<i64>,
    /// All-time contributor count.
    pub total_contributors: Option<i64>,
    /// Stars summed across tracked repos.
    pub total_stars: Option<i64>,
    /// Number of tracked repos.
    pub repo_count: Option<i64>,
    pub fetch_status: FetchStatus,
    pub fetch_error: Option<String>,
}

/// Twitter/social snapshot for one company.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TwitterMetrics {
    pub followers: Option<i64>,
    pub following: Option<i64>,
    pub tweet_count: Option<i64>,
    pub fetch_status: FetchStatus,
    pub fetch_error: Option<String>,
}

/// On-chain activity snapshot for one company.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnchainMetrics {
    /// Total value locked, in USD.
    pub tvl: Option<f64>,
    /// Transactions in the last 24 hours.
    pub tx_count_24h: Option<i64>,
    /// Active addresses in the last 24 hours.
    pub active_users_24h: Option<i64>,
    /// Market capitalization, in USD.
    pub market_cap: Option<f64>,
    /// Chain the figures were read from (e.g. "ethereum").
    pub chain: Option<String>,
    pub fetch_status: FetchStatus,
    pub fetch_error: Option<String>,
}

/// The three per-source metric sub-objects, as fetched upstream.
///
/// A missing sub-object behaves exactly like a non-success fetch: the scorer
/// for that source returns a zero score with zero confidence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexData {
    pub github: Option<GithubMetrics>,
    pub twitter: Option<TwitterMetrics>,
    pub onchain: Option<OnchainMetrics>,
}

/// Complete scoring input for one company: category tag plus fetched metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMetrics {
    /// Free-form category tag (e.g. "defi", "infrastructure"), matched
    /// case-insensitively. Unknown values fall back to the general profile.
    pub category: String,
    pub index_data: IndexData,
}

// ============ Category & Trend ============

/// Company category, parsed from the free-form tag.
///
/// The weight-profile and adoption-relevance rules dispatch on this enum so
/// the mapping stays exhaustive; `Other` absorbs anything unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Infra / dev-tooling projects. Defined as not needing on-chain adoption
    /// signals at all.
    Infrastructure,
    Defi,
    Dao,
    Nft,
    Gaming,
    /// Unrecognized or absent category tag.
    Other,
}

impl Category {
    /// Parse a raw category tag. Matching is case-insensitive and tolerant of
    /// surrounding whitespace; anything unrecognized maps to `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "infra" | "infrastructure" | "dev-tools" | "developer-tools" => {
                Category::Infrastructure
            }
            "defi" => Category::Defi,
            "dao" => Category::Dao,
            "nft" => Category::Nft,
            "gaming" => Category::Gaming,
            _ => Category::Other,
        }
    }

    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Category::Infrastructure)
    }
}

/// Direction label derived from recent GitHub activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

// ============ Scoring Results ============

/// Score/confidence pair produced by one component scorer.
///
/// Both values are integers in [0, 100]. Confidence expresses how much of the
/// scorer's inputs were actually present, not how good the score is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub score: i32,
    pub confidence: i32,
}

impl ComponentScore {
    /// The "no signal" result: returned for failed fetches, missing
    /// sub-objects, and adoption on infrastructure categories.
    pub const ZERO: ComponentScore = ComponentScore {
        score: 0,
        confidence: 0,
    };

    /// Build a component score, clamping both values into [0, 100].
    pub fn new(score: i32, confidence: i32) -> Self {
        Self {
            score: score.clamp(0, 100),
            confidence: confidence.clamp(0, 100),
        }
    }
}

/// Composite scoring result for one company.
///
/// Recomputed from scratch on every run and overwritten wholesale; there is
/// no history or incremental merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyScores {
    pub overall_score: i32,
    pub team_health_score: i32,
    pub community_score: i32,
    pub adoption_score: i32,
    pub trend: Trend,
    /// Weighted blend of the component confidences.
    pub confidence: i32,
}

// ============ Database Models ============

/// A company row as persisted in Postgres.
///
/// `index_data` holds the raw fetched metrics (`IndexData` shape) as jsonb;
/// the flat score columns mirror the latest `CompanyScores`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    /// URL-safe unique identifier used by the ingestion webhook.
    pub slug: String,
    /// Raw category tag as reported upstream; parsed at scoring time.
    pub category: String,
    pub index_data: serde_json::Value,
    /// Inactive companies are skipped by recalculation runs.
    pub active: bool,
    pub overall_score: Option<i32>,
    pub team_health_score: Option<i32>,
    pub community_score: Option<i32>,
    pub adoption_score: Option<i32>,
    pub trend: Option<String>,
    pub score_confidence: Option<i32>,
    /// Latest `CompanyScores` as jsonb, mirroring the flat columns.
    pub scores: Option<serde_json::Value>,
    /// When the scores were last recomputed.
    pub scored_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ============ API Request/Response Models ============

/// Response for the admin recalculation endpoint.
#[derive(Debug, Serialize)]
pub struct RecalculateResponse {
    pub success: bool,
    /// Companies considered by the run.
    pub processed: usize,
    /// Companies whose scores were computed and persisted.
    pub succeeded: usize,
    /// Companies where persistence failed (scoring itself cannot fail).
    pub failed: usize,
    pub duration_ms: u64,
}

/// Query parameters for the ranked company listing.
#[derive(Debug, Deserialize)]
pub struct TopCompaniesQuery {
    /// Maximum rows to return (default 20, capped at 100).
    pub limit: Option<i64>,
}

/// One row of the ranked company listing.
#[derive(Debug, Serialize)]
pub struct RankedCompany {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub overall_score: i32,
    pub trend: Option<String>,
    pub confidence: Option<i32>,
}

/// Response for a single company's scores.
///
/// Also the payload shape held by the score read cache, hence Deserialize.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyScoresResponse {
    pub company_id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub scores: CompanyScores,
    pub scored_at: Option<DateTime<Utc>>,
}

/// Payload for the metrics ingestion webhook.
///
/// Carries one company's freshly fetched metrics. `name` and `category` are
/// only required when the slug is not yet known to the service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsWebhookPayload {
    pub slug: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub index_data: IndexData,
}

/// Response for the metrics ingestion webhook.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsWebhookResponse {
    pub success: bool,
    pub message: String,
    pub company_id: Option<Uuid>,
    pub scores: Option<CompanyScores>,
}
