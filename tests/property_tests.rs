//! Property-based tests for distance, scoring and ranking.
//!
//! # Invariants tested
//!
//! - **Hard filter:** no site rated below `min_rating` is ever returned.
//! - **Ordering:** output is non-increasing by score, equal scores by id.
//! - **Determinism:** scoring the same input twice is bit-identical.
//! - **Monotonic rating:** a higher rating never lowers the score.
//! - **Distance:** symmetric, non-negative, zero to itself.

use proptest::prelude::*;
use site_ranker::core::{coordinate::GeoCoordinate, RankingEngine, RelevanceScorer};
use site_ranker::models::{SearchCriteria, Site, SiteType};

const NAMES: [&str; 6] = [
    "Roman Forum",
    "Colosseum",
    "Museum of Rome",
    "Old Town Walls",
    "Roman Baths",
    "Forum Gallery",
];

fn coordinate_strategy() -> impl Strategy<Value = GeoCoordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0)
        .prop_map(|(lat, lon)| GeoCoordinate::new(lat, lon).unwrap())
}

/// Coordinates clustered around Rome so proximity bonuses actually vary
fn nearby_coordinate_strategy() -> impl Strategy<Value = GeoCoordinate> {
    (41.85f64..41.95, 12.43f64..12.55).prop_map(|(lat, lon)| GeoCoordinate::new(lat, lon).unwrap())
}

fn site_type_strategy() -> impl Strategy<Value = SiteType> {
    prop::sample::select(SiteType::ALL.to_vec())
}

fn site_strategy() -> impl Strategy<Value = Site> {
    (
        0u16..40,
        prop::sample::select(NAMES.to_vec()),
        site_type_strategy(),
        nearby_coordinate_strategy(),
        0.0f64..=10.0,
    )
        .prop_map(|(id, name, site_type, location, rating)| {
            Site::new(format!("S{}", id), name, site_type, location, rating)
        })
}

fn criteria_strategy() -> impl Strategy<Value = SearchCriteria> {
    (
        prop::option::of(prop::sample::select(vec!["roman", "FORUM", "museum", "zzz"])),
        prop::option::of(site_type_strategy()),
        0.0f64..=10.0,
        nearby_coordinate_strategy(),
    )
        .prop_map(|(keywords, site_type, min_rating, user)| {
            let mut criteria = SearchCriteria::at(user.latitude(), user.longitude()).with_min_rating(min_rating);
            criteria.keywords = keywords.map(str::to_string);
            criteria.site_type = site_type;
            criteria
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn filtered_sites_never_returned(
        sites in prop::collection::vec(site_strategy(), 0..60),
        criteria in criteria_strategy(),
    ) {
        let ranked = RankingEngine::default().filter_and_rank(sites, &criteria).unwrap();
        for site in &ranked {
            prop_assert!(site.average_rating >= criteria.min_rating);
        }
    }

    #[test]
    fn output_is_totally_ordered(
        sites in prop::collection::vec(site_strategy(), 0..60),
        criteria in criteria_strategy(),
    ) {
        let expected_len = sites.iter().filter(|s| s.average_rating >= criteria.min_rating).count();
        let result = RankingEngine::default().rank(sites, &criteria).unwrap();
        prop_assert_eq!(result.results.len(), expected_len);

        let scorer = RelevanceScorer::default();
        for pair in result.results.windows(2) {
            let a = scorer.calculate_relevance(&pair[0].site, &criteria).unwrap();
            let b = scorer.calculate_relevance(&pair[1].site, &criteria).unwrap();
            prop_assert!(a >= b);
            if a == b {
                prop_assert!(pair[0].site.id <= pair[1].site.id);
            }
        }
    }

    #[test]
    fn ranking_ignores_input_order(
        sites in prop::collection::vec(site_strategy(), 0..40),
        criteria in criteria_strategy(),
    ) {
        let engine = RankingEngine::default();
        let mut reversed = sites.clone();
        reversed.reverse();

        let forward: Vec<(String, u64)> = engine
            .rank(sites, &criteria)
            .unwrap()
            .results
            .into_iter()
            .map(|r| (r.site.id, r.score.to_bits()))
            .collect();
        let backward: Vec<(String, u64)> = engine
            .rank(reversed, &criteria)
            .unwrap()
            .results
            .into_iter()
            .map(|r| (r.site.id, r.score.to_bits()))
            .collect();

        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn scoring_is_deterministic(site in site_strategy(), criteria in criteria_strategy()) {
        let scorer = RelevanceScorer::default();
        let a = scorer.calculate_relevance(&site, &criteria).unwrap();
        let b = scorer.calculate_relevance(&site, &criteria).unwrap();
        prop_assert_eq!(a.to_bits(), b.to_bits());
        prop_assert!(a >= 0.0);
    }

    #[test]
    fn score_monotonic_in_rating(
        site in site_strategy(),
        criteria in criteria_strategy(),
        bump in 0.0f64..=10.0,
    ) {
        let scorer = RelevanceScorer::default();
        let mut better = site.clone();
        better.average_rating = (site.average_rating + bump).min(10.0);

        let before = scorer.calculate_relevance(&site, &criteria).unwrap();
        let after = scorer.calculate_relevance(&better, &criteria).unwrap();
        prop_assert!(after >= before);
    }

    #[test]
    fn distance_symmetric_and_non_negative(a in coordinate_strategy(), b in coordinate_strategy()) {
        let there = a.distance_to(&b);
        let back = b.distance_to(&a);

        prop_assert!(there >= 0.0);
        prop_assert!((there - back).abs() <= 1e-9 * there.max(1.0));
        prop_assert!(a.distance_to(&a).abs() < 1e-9);
    }
}
