/// Composite scoring for one company.
///
/// This module ties the component scorers together:
/// 1. Score team health, community, and adoption independently
/// 2. Blend them with the category's weight profile
/// 3. Classify the activity trend from GitHub data
///
/// Everything here is pure and synchronous — no I/O, no clock, no shared
/// state. Scoring N companies is an independent map over their raw metrics;
/// callers may run it sequentially or concurrently without coordination.
use crate::models::{Category, CompanyScores, ComponentScore, GithubMetrics, RawMetrics, Trend};
use crate::scorers::{adoption_score, community_score, team_health_score};
use crate::weights::CategoryWeights;

/// Blend the three component results with the category's weight profile.
///
/// The overall confidence divides by the weight total generically rather than
/// assuming the profiles sum to 1.0.
pub fn aggregate(
    team: ComponentScore,
    community: ComponentScore,
    adoption: ComponentScore,
    category: Category,
) -> ComponentScore {
    let w = CategoryWeights::for_category(category);

    let score = (team.score as f64 * w.team
        + community.score as f64 * w.community
        + adoption.score as f64 * w.adoption)
        .round() as i32;

    let confidence = ((team.confidence as f64 * w.team
        + community.confidence as f64 * w.community
        + adoption.confidence as f64 * w.adoption)
        / w.total())
    .round() as i32;

    ComponentScore::new(score, confidence)
}

/// Classify the activity trend from recent GitHub data alone.
///
/// Community and adoption signals are deliberately ignored here. The rules
/// are evaluated in order and the first match wins — the ranges overlap, so
/// the order is the tie-break. Null fields default to 0, which is why a
/// company with no GitHub data at all trends "down".
pub fn classify_trend(github: Option<&GithubMetrics>) -> Trend {
    let commits = github.and_then(|g| g.total_commits_30d).unwrap_or(0);
    let contributors = github.and_then(|g| g.active_contributors_30d).unwrap_or(0);

    if commits > 100 && contributors > 10 {
        return Trend::Up;
    }
    if commits > 50 && contributors > 5 {
        return Trend::Up;
    }
    if commits < 5 {
        return Trend::Down;
    }
    if commits < 20 && contributors < 2 {
        return Trend::Down;
    }
    Trend::Stable
}

/// Compute the full score set for one company from its raw metrics.
///
/// Never fails on well-formed input: missing sub-objects and null fields are
/// data-quality conditions that surface as low confidence, not errors.
/// Calling this twice with identical input yields identical output.
pub fn calculate_company_scores(raw: &RawMetrics) -> CompanyScores {
    let category = Category::parse(&raw.category);

    let team = team_health_score(raw.index_data.github.as_ref());
    let community = community_score(raw.index_data.twitter.as_ref());
    let adoption = adoption_score(raw.index_data.onchain.as_ref(), category);

    let overall = aggregate(team, community, adoption, category);
    let trend = classify_trend(raw.index_data.github.as_ref());

    tracing::debug!(
        category = %raw.category,
        overall = overall.score,
        team = team.score,
        community = community.score,
        adoption = adoption.score,
        trend = trend.as_str(),
        "company scored"
    );

    CompanyScores {
        overall_score: overall.score,
        team_health_score: team.score,
        community_score: community.score,
        adoption_score: adoption.score,
        trend,
        confidence: overall.confidence,
    }
}
