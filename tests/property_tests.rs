/// Property-based tests using proptest
/// Tests invariants and properties that should hold for all inputs
use company_scores_api::models::{
    Category, ComponentScore, FetchStatus, GithubMetrics, IndexData, OnchainMetrics, RawMetrics,
    TwitterMetrics,
};
use company_scores_api::normalize::normalize;
use company_scores_api::scorers::{adoption_score, community_score, team_health_score};
use company_scores_api::scoring::{aggregate, calculate_company_scores};
use proptest::prelude::*;

fn any_category() -> impl Strategy<Value = Category> {
    prop::sample::select(vec![
        Category::Infrastructure,
        Category::Defi,
        Category::Dao,
        Category::Nft,
        Category::Gaming,
        Category::Other,
    ])
}

fn any_fetch_status() -> impl Strategy<Value = FetchStatus> {
    prop::sample::select(vec![
        FetchStatus::Success,
        FetchStatus::Failed,
        FetchStatus::Pending,
    ])
}

prop_compose! {
    fn any_github()(
        commits in prop::option::of(-1000i64..1_000_000),
        contributors in prop::option::of(-100i64..100_000),
        total in prop::option::of(0i64..100_000),
        stars in prop::option::of(-100i64..10_000_000),
        repos in prop::option::of(0i64..10_000),
        status in any_fetch_status(),
    ) -> GithubMetrics {
        GithubMetrics {
            total_commits_30d: commits,
            active_contributors_30d: contributors,
            total_contributors: total,
            total_stars: stars,
            repo_count: repos,
            fetch_status: status,
            fetch_error: None,
        }
    }
}

prop_compose! {
    fn any_twitter()(
        followers in prop::option::of(0i64..100_000_000),
        following in prop::option::of(0i64..10_000_000),
        tweets in prop::option::of(0i64..10_000_000),
        status in any_fetch_status(),
    ) -> TwitterMetrics {
        TwitterMetrics {
            followers,
            following,
            tweet_count: tweets,
            fetch_status: status,
            fetch_error: None,
        }
    }
}

prop_compose! {
    fn any_onchain()(
        tvl in prop::option::of(-1e9..1e12),
        tx in prop::option::of(0i64..100_000_000),
        users in prop::option::of(0i64..100_000_000),
        mcap in prop::option::of(0.0..1e13),
        status in any_fetch_status(),
    ) -> OnchainMetrics {
        OnchainMetrics {
            tvl,
            tx_count_24h: tx,
            active_users_24h: users,
            market_cap: mcap,
            chain: None,
            fetch_status: status,
            fetch_error: None,
        }
    }
}

prop_compose! {
    fn any_raw_metrics()(
        category in "[a-zA-Z-]{0,16}",
        github in prop::option::of(any_github()),
        twitter in prop::option::of(any_twitter()),
        onchain in prop::option::of(any_onchain()),
    ) -> RawMetrics {
        RawMetrics {
            category,
            index_data: IndexData { github, twitter, onchain },
        }
    }
}

// Property: sigmoid symmetry - the midpoint always scores exactly 50
proptest! {
    #[test]
    fn normalize_at_midpoint_is_fifty(
        midpoint in -1e6..1e6f64,
        steepness in 1e-7..1.0f64
    ) {
        prop_assert_eq!(normalize(midpoint, midpoint, steepness), 50);
    }

    #[test]
    fn normalize_output_in_range(
        value in -1e9..1e9f64,
        midpoint in -1e6..1e6f64,
        steepness in 1e-7..1.0f64
    ) {
        let score = normalize(value, midpoint, steepness);
        prop_assert!((0..=100).contains(&score));
    }

    #[test]
    fn normalize_is_monotone(
        a in -1e9..1e9f64,
        b in -1e9..1e9f64,
        midpoint in -1e6..1e6f64,
        steepness in 1e-7..1.0f64
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(normalize(lo, midpoint, steepness) <= normalize(hi, midpoint, steepness));
    }
}

// Property: non-success fetches always zero out a component entirely
proptest! {
    #[test]
    fn team_health_zero_unless_success(gh in any_github()) {
        let result = team_health_score(Some(&gh));
        if gh.fetch_status != FetchStatus::Success {
            prop_assert_eq!(result, ComponentScore::ZERO);
        }
    }

    #[test]
    fn community_zero_unless_success(tw in any_twitter()) {
        let result = community_score(Some(&tw));
        if tw.fetch_status != FetchStatus::Success {
            prop_assert_eq!(result, ComponentScore::ZERO);
        }
    }

    #[test]
    fn adoption_zero_on_failed_fetch(oc in any_onchain(), category in any_category()) {
        let result = adoption_score(Some(&oc), category);
        if oc.fetch_status == FetchStatus::Failed {
            prop_assert_eq!(result, ComponentScore::ZERO);
        }
    }

    #[test]
    fn adoption_always_zero_for_infrastructure(oc in any_onchain()) {
        prop_assert_eq!(
            adoption_score(Some(&oc), Category::Infrastructure),
            ComponentScore::ZERO
        );
    }
}

// Property: component results always stay on the 0-100 integer scale
proptest! {
    #[test]
    fn component_results_in_range(
        gh in any_github(),
        tw in any_twitter(),
        oc in any_onchain(),
        category in any_category()
    ) {
        for result in [
            team_health_score(Some(&gh)),
            community_score(Some(&tw)),
            adoption_score(Some(&oc), category),
        ] {
            prop_assert!((0..=100).contains(&result.score));
            prop_assert!((0..=100).contains(&result.confidence));
        }
    }

    #[test]
    fn aggregate_in_range(
        team_s in 0i32..=100, team_c in 0i32..=100,
        community_s in 0i32..=100, community_c in 0i32..=100,
        adoption_s in 0i32..=100, adoption_c in 0i32..=100,
        category in any_category()
    ) {
        let result = aggregate(
            ComponentScore::new(team_s, team_c),
            ComponentScore::new(community_s, community_c),
            ComponentScore::new(adoption_s, adoption_c),
            category,
        );
        prop_assert!((0..=100).contains(&result.score));
        prop_assert!((0..=100).contains(&result.confidence));
    }
}

// Property: full pipeline never panics, stays in range, and is deterministic
proptest! {
    #[test]
    fn calculate_company_scores_total_and_deterministic(raw in any_raw_metrics()) {
        let first = calculate_company_scores(&raw);
        let second = calculate_company_scores(&raw);

        prop_assert_eq!(&first, &second);
        prop_assert!((0..=100).contains(&first.overall_score));
        prop_assert!((0..=100).contains(&first.team_health_score));
        prop_assert!((0..=100).contains(&first.community_score));
        prop_assert!((0..=100).contains(&first.adoption_score));
        prop_assert!((0..=100).contains(&first.confidence));
    }

    #[test]
    fn category_parsing_never_panics(tag in "\\PC*") {
        let _ = Category::parse(&tag);
    }
}
