/// Component scorers for the three signal sources.
///
/// Each scorer is a pure function from one raw metrics sub-object to a
/// `ComponentScore`. They are independent of each other; the aggregator in
/// `scoring` combines them. Confidence expresses how much of the scorer's
/// input was actually present, and a non-success fetch always yields
/// `{score: 0, confidence: 0}` so a failed fetch never masquerades as
/// "zero activity, but confident about it."
use crate::models::{Category, ComponentScore, GithubMetrics, OnchainMetrics, TwitterMetrics};
use crate::normalize::normalize;

// Team-health curve parameters (GitHub).
pub const COMMIT_MIDPOINT: f64 = 50.0;
pub const COMMIT_STEEPNESS: f64 = 0.05;
pub const CONTRIBUTOR_MIDPOINT: f64 = 10.0;
pub const CONTRIBUTOR_STEEPNESS: f64 = 0.2;
pub const STAR_MIDPOINT: f64 = 500.0;
pub const STAR_STEEPNESS: f64 = 0.002;
pub const REPO_MIDPOINT: f64 = 20.0;
pub const REPO_STEEPNESS: f64 = 0.1;

// Community curve parameters (Twitter).
pub const FOLLOWER_MIDPOINT: f64 = 10_000.0;
pub const FOLLOWER_STEEPNESS: f64 = 0.0001;
pub const TWEET_MIDPOINT: f64 = 1_000.0;
pub const TWEET_STEEPNESS: f64 = 0.002;
pub const ENGAGEMENT_MIDPOINT: f64 = 5.0;
pub const ENGAGEMENT_STEEPNESS: f64 = 0.3;

/// Null-tolerant read of a count field. Negative values from a bad upstream
/// feed are clamped to zero before normalization.
fn count(value: Option<i64>) -> f64 {
    value.unwrap_or(0).max(0) as f64
}

/// Null-tolerant read of a monetary/float field, clamped at zero.
fn amount(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0).max(0.0)
}

/// Team-health score from GitHub activity.
///
/// Weighted blend of commit cadence, active contributors, stars, and repo
/// count. Confidence starts at 100 and loses 30 points for missing commit
/// data, 30 for missing contributor data, and 20 for missing stars.
pub fn team_health_score(github: Option<&GithubMetrics>) -> ComponentScore {
    let Some(gh) = github else {
        return ComponentScore::ZERO;
    };
    if !gh.fetch_status.is_success() {
        return ComponentScore::ZERO;
    }

    let commit_score = normalize(count(gh.total_commits_30d), COMMIT_MIDPOINT, COMMIT_STEEPNESS);
    let contributor_score = normalize(
        count(gh.active_contributors_30d),
        CONTRIBUTOR_MIDPOINT,
        CONTRIBUTOR_STEEPNESS,
    );
    let star_score = normalize(count(gh.total_stars), STAR_MIDPOINT, STAR_STEEPNESS);
    let repo_score = normalize(count(gh.repo_count), REPO_MIDPOINT, REPO_STEEPNESS);

    let score = (0.35 * commit_score as f64
        + 0.35 * contributor_score as f64
        + 0.20 * star_score as f64
        + 0.10 * repo_score as f64)
        .round() as i32;

    let mut confidence = 100;
    if gh.total_commits_30d.is_none() {
        confidence -= 30;
    }
    if gh.active_contributors_30d.is_none() {
        confidence -= 30;
    }
    if gh.total_stars.is_none() {
        confidence -= 20;
    }

    ComponentScore::new(score, confidence)
}

/// Community score from Twitter/social metrics.
///
/// Confidence is flat 100 on a successful fetch; unlike the GitHub scorer
/// there is no per-field penalty here.
pub fn community_score(twitter: Option<&TwitterMetrics>) -> ComponentScore {
    let Some(tw) = twitter else {
        return ComponentScore::ZERO;
    };
    if !tw.fetch_status.is_success() {
        return ComponentScore::ZERO;
    }

    let followers = count(tw.followers);
    let following = count(tw.following);
    // Accounts following nobody keep their raw follower count as the ratio.
    let engagement_ratio = if following > 0.0 {
        followers / following
    } else {
        followers
    };

    let follower_score = normalize(followers, FOLLOWER_MIDPOINT, FOLLOWER_STEEPNESS);
    let tweet_score = normalize(count(tw.tweet_count), TWEET_MIDPOINT, TWEET_STEEPNESS);
    let engagement_score = normalize(engagement_ratio, ENGAGEMENT_MIDPOINT, ENGAGEMENT_STEEPNESS);

    let score = (0.5 * follower_score as f64
        + 0.2 * tweet_score as f64
        + 0.3 * engagement_score as f64)
        .round() as i32;

    ComponentScore::new(score, 100)
}

/// Adoption score from on-chain activity, branched by category.
///
/// Infrastructure projects opt out entirely: they return the zero sentinel
/// and the aggregator gives adoption zero weight for them, so the result is
/// mathematically irrelevant to their overall score. Only a `failed` fetch
/// zeroes the other categories — a `pending` snapshot still scores whatever
/// fields it carries.
pub fn adoption_score(onchain: Option<&OnchainMetrics>, category: Category) -> ComponentScore {
    if category.is_infrastructure() {
        return ComponentScore::ZERO;
    }
    let Some(oc) = onchain else {
        return ComponentScore::ZERO;
    };
    if oc.fetch_status.is_failed() {
        return ComponentScore::ZERO;
    }

    match category {
        Category::Defi => {
            let tvl_score = normalize(amount(oc.tvl), 1_000_000.0, 0.000_001);
            let tx_score = normalize(count(oc.tx_count_24h), 100.0, 0.02);
            let user_score = normalize(count(oc.active_users_24h), 50.0, 0.05);

            let score = (0.5 * tvl_score as f64
                + 0.3 * user_score as f64
                + 0.2 * tx_score as f64)
                .round() as i32;
            let confidence = if oc.tvl.is_some() { 80 } else { 40 };
            ComponentScore::new(score, confidence)
        }
        Category::Nft | Category::Gaming => {
            let tx_score = normalize(count(oc.tx_count_24h), 500.0, 0.005);
            let user_score = normalize(count(oc.active_users_24h), 200.0, 0.01);

            let score = (0.6 * user_score as f64 + 0.4 * tx_score as f64).round() as i32;
            let confidence = if oc.active_users_24h.is_some() { 70 } else { 30 };
            ComponentScore::new(score, confidence)
        }
        _ => {
            // General profile (DAOs and everything unrecognized). A null field
            // contributes nothing to the sum; the remaining weights are NOT
            // renormalized, so partially-missing data pulls the score down.
            let tvl_score = normalize(amount(oc.tvl), 500_000.0, 0.000_002);
            let tx_score = normalize(count(oc.tx_count_24h), 50.0, 0.04);
            let mcap_score = normalize(amount(oc.market_cap), 5_000_000.0, 0.000_000_2);

            let mut weighted_sum = 0.0;
            if oc.tvl.is_some() {
                weighted_sum += 0.4 * tvl_score as f64;
            }
            if oc.tx_count_24h.is_some() {
                weighted_sum += 0.3 * tx_score as f64;
            }
            if oc.market_cap.is_some() {
                weighted_sum += 0.3 * mcap_score as f64;
            }

            ComponentScore::new(weighted_sum.round() as i32, 50)
        }
    }
}
