use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::{
    filters::{meets_min_rating, validate_criteria, validate_site, RadiusFilter},
    scoring::{QueryContext, RelevanceScorer},
};
use crate::error::Result;
use crate::models::{RankedSite, SearchCriteria, Site};

/// Candidate count at which scoring moves onto the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Result of the ranking process
#[derive(Debug, Clone, PartialEq)]
pub struct RankingResult {
    pub results: Vec<RankedSite>,
    pub total_candidates: usize,
    /// Candidates removed by the hard filters (rating, radius)
    pub filtered_out: usize,
}

/// Ranking orchestrator - filter, score, sort
///
/// # Pipeline Stages
/// 1. Validate criteria and every candidate
/// 2. Hard filters: minimum rating, optional radius
/// 3. Score each survivor (in parallel for large sets)
/// 4. Sort by score descending, ties by ascending id
///
/// The engine holds no per-query state; one instance can serve any number of
/// queries from any number of threads.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    scorer: RelevanceScorer,
    parallel_threshold: usize,
}

impl RankingEngine {
    pub fn new(scorer: RelevanceScorer) -> Self {
        Self {
            scorer,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Ordered sites for `criteria`.
    ///
    /// An empty input, or one where every site is filtered out, is an empty
    /// list rather than an error.
    pub fn filter_and_rank(&self, sites: Vec<Site>, criteria: &SearchCriteria) -> Result<Vec<Site>> {
        let ranking = self.rank(sites, criteria)?;
        Ok(ranking.results.into_iter().map(|ranked| ranked.site).collect())
    }

    /// Full ranking with scores and distances.
    pub fn rank(&self, sites: Vec<Site>, criteria: &SearchCriteria) -> Result<RankingResult> {
        let scale = self.scorer.rating_scale_max();
        validate_criteria(criteria, scale)?;
        let query = QueryContext::new(criteria)?;

        for site in &sites {
            validate_site(site, scale)?;
        }

        let total_candidates = sites.len();
        let radius = criteria
            .max_distance_km
            .map(|km| RadiusFilter::new(query.user_location(), km));

        let retained: Vec<(Site, f64)> = sites
            .into_iter()
            .filter(|site| meets_min_rating(site, criteria))
            .filter_map(|site| {
                let distance_km = match &radius {
                    Some(filter) => filter.distance_within(&site)?,
                    None => query.user_location().distance_to(&site.location),
                };
                Some((site, distance_km))
            })
            .collect();

        let filtered_out = total_candidates - retained.len();

        let mut results = self.score_all(retained, &query);
        results.sort_by(compare_ranked);

        if let Some(limit) = criteria.limit {
            results.truncate(limit);
        }

        Ok(RankingResult {
            results,
            total_candidates,
            filtered_out,
        })
    }

    fn score_all(&self, retained: Vec<(Site, f64)>, query: &QueryContext) -> Vec<RankedSite> {
        let score_one = |(site, distance_km): (Site, f64)| {
            let score = self.scorer.score(&site, query, distance_km);
            RankedSite {
                site,
                score,
                distance_km,
            }
        };

        #[cfg(feature = "parallel")]
        if retained.len() >= self.parallel_threshold {
            return retained.into_par_iter().map(score_one).collect();
        }

        retained.into_iter().map(score_one).collect()
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(RelevanceScorer::default())
    }
}

/// Total order: score descending, then id ascending.
pub fn compare_ranked(a: &RankedSite, b: &RankedSite) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.site.id.cmp(&b.site.id))
}
