use crate::core::coordinate::GeoCoordinate;
use crate::error::{RankingError, Result};
use crate::models::{ScoringWeights, SearchCriteria, Site, SiteType};

/// Default rating scale: `average_rating` and `min_rating` are in `0.0..=10.0`.
pub const RATING_SCALE_MAX: f64 = 10.0;

/// Search criteria resolved once per query
///
/// Holds the validated user position and the case-folded keyword so that
/// scoring a candidate does no allocation or validation.
#[derive(Debug, Clone)]
pub struct QueryContext {
    user_location: GeoCoordinate,
    keyword: Option<String>,
    site_type: Option<SiteType>,
}

impl QueryContext {
    /// Resolve `criteria`; an invalid user position is an `InvalidCriteria` error.
    pub fn new(criteria: &SearchCriteria) -> Result<Self> {
        let user_location = GeoCoordinate::new(criteria.user_latitude, criteria.user_longitude)
            .map_err(|e| RankingError::InvalidCriteria(format!("user position: {}", e)))?;

        Ok(Self {
            user_location,
            keyword: criteria.keyword_text().map(str::to_lowercase),
            site_type: criteria.site_type,
        })
    }

    pub fn user_location(&self) -> GeoCoordinate {
        self.user_location
    }
}

/// Relevance of one site against one query
///
/// score = keyword bonus
///       + type bonus
///       + rating / rating_scale_max
///       + proximity bonus (near / nearby / nothing)
///
/// The function is pure: identical inputs give bit-identical scores.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceScorer {
    weights: ScoringWeights,
    rating_scale_max: f64,
}

impl RelevanceScorer {
    pub fn new(weights: ScoringWeights, rating_scale_max: f64) -> Self {
        Self { weights, rating_scale_max }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn rating_scale_max(&self) -> f64 {
        self.rating_scale_max
    }

    /// Score `site` for `criteria`, higher is more relevant.
    pub fn calculate_relevance(&self, site: &Site, criteria: &SearchCriteria) -> Result<f64> {
        let query = QueryContext::new(criteria)?;
        let distance_km = query.user_location.distance_to(&site.location);
        Ok(self.score(site, &query, distance_km))
    }

    /// Score against an already resolved query and a precomputed distance.
    #[inline]
    pub fn score(&self, site: &Site, query: &QueryContext, distance_km: f64) -> f64 {
        let mut score = 0.0;

        if let Some(keyword) = &query.keyword {
            if site.name.to_lowercase().contains(keyword.as_str()) {
                score += self.weights.keyword;
            }
        }

        if query.site_type == Some(site.site_type) {
            score += self.weights.site_type;
        }

        score += self.quality_score(site.average_rating);
        score += self.proximity_score(distance_km);

        score.max(0.0)
    }

    /// Rating as a fraction of the scale, 1.0 at scale max
    #[inline]
    fn quality_score(&self, rating: f64) -> f64 {
        (rating / self.rating_scale_max).min(1.0)
    }

    #[inline]
    fn proximity_score(&self, distance_km: f64) -> f64 {
        if distance_km < self.weights.near_radius_km {
            self.weights.near
        } else if distance_km < self.weights.nearby_radius_km {
            self.weights.nearby
        } else {
            0.0
        }
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default(), RATING_SCALE_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roman_forum(rating: f64) -> Site {
        Site::new(
            "S1",
            "Roman Forum",
            SiteType::Museum,
            GeoCoordinate::new(41.8925, 12.4853).unwrap(),
            rating,
        )
    }

    fn criteria() -> SearchCriteria {
        SearchCriteria::at(41.8933, 12.4854)
            .with_keywords("roman")
            .with_site_type(SiteType::Museum)
            .with_min_rating(5.0)
    }

    #[test]
    fn test_all_bonuses() {
        let scorer = RelevanceScorer::default();
        let score = scorer.calculate_relevance(&roman_forum(8.0), &criteria()).unwrap();

        assert!((score - 1.8).abs() < 1e-9, "expected 1.8, got {}", score);
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let scorer = RelevanceScorer::default();
        let upper = criteria().with_keywords("ROMAN FOR");
        let score = scorer.calculate_relevance(&roman_forum(8.0), &upper).unwrap();

        assert!((score - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_no_keyword_no_type() {
        let scorer = RelevanceScorer::default();
        let plain = SearchCriteria::at(41.8933, 12.4854);
        let score = scorer.calculate_relevance(&roman_forum(8.0), &plain).unwrap();

        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_proximity_bands() {
        let scorer = RelevanceScorer::default();

        assert_eq!(scorer.proximity_score(0.1), 0.2);
        assert_eq!(scorer.proximity_score(1.0), 0.1);
        assert_eq!(scorer.proximity_score(4.99), 0.1);
        assert_eq!(scorer.proximity_score(5.0), 0.0);
        assert_eq!(scorer.proximity_score(1200.0), 0.0);
    }

    #[test]
    fn test_quality_caps_at_scale_max() {
        let scorer = RelevanceScorer::new(ScoringWeights::default(), 5.0);

        assert_eq!(scorer.quality_score(5.0), 1.0);
        assert_eq!(scorer.quality_score(2.5), 0.5);
    }

    #[test]
    fn test_query_context_keeps_keyword_verbatim() {
        let query = QueryContext::new(&criteria().with_keywords("Forum ")).unwrap();

        assert_eq!(query.keyword.as_deref(), Some("forum "));
        assert_eq!(query.user_location(), GeoCoordinate::new(41.8933, 12.4854).unwrap());

        let scorer = RelevanceScorer::default();
        let score = scorer.score(&roman_forum(8.0), &query, 0.1);
        assert!((score - 1.3).abs() < 1e-9, "expected 1.3, got {}", score);
    }

    #[test]
    fn test_invalid_user_position() {
        let scorer = RelevanceScorer::default();
        let bad = SearchCriteria::at(f64::NAN, 12.0);

        let err = scorer.calculate_relevance(&roman_forum(8.0), &bad).unwrap_err();
        assert!(matches!(err, RankingError::InvalidCriteria(_)));
    }
}
