//! Site Ranker - geospatial relevance search for cultural heritage sites
//!
//! Given a tourist's position and search criteria, the ranking engine drops
//! sites below the minimum rating, scores the rest on keyword, category,
//! quality and proximity, and returns them best first.
//!
//! ```
//! use site_ranker::{GeoCoordinate, RankingEngine, SearchCriteria, Site, SiteType};
//!
//! let forum = Site::new(
//!     "S1",
//!     "Roman Forum",
//!     SiteType::Museum,
//!     GeoCoordinate::new(41.8925, 12.4853).unwrap(),
//!     8.0,
//! );
//! let criteria = SearchCriteria::at(41.8933, 12.4854).with_keywords("roman");
//!
//! let ranked = RankingEngine::default().filter_and_rank(vec![forum], &criteria).unwrap();
//! assert_eq!(ranked[0].id, "S1");
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{GeoCoordinate, RankingEngine, RankingResult, RelevanceScorer, RATING_SCALE_MAX};
pub use crate::error::{RankingError, Result};
pub use crate::models::{RankedSite, ScoringWeights, SearchCriteria, SearchRequest, SearchResponse, Site, SiteType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let here = GeoCoordinate::new(40.7128, -74.0060).unwrap();
        assert_eq!(here.distance_to(&here), 0.0);
        assert_eq!(RankingEngine::default().scorer().rating_scale_max(), RATING_SCALE_MAX);
    }
}
