// Core algorithm exports
pub mod filters;
pub mod coordinate;
pub mod ranking;
pub mod scoring;

pub use self::filters::{meets_min_rating, validate_criteria, validate_site, RadiusFilter};
pub use self::coordinate::{haversine_distance, BoundingBox, GeoCoordinate, EARTH_RADIUS_KM};
pub use self::ranking::{compare_ranked, RankingEngine, RankingResult};
pub use self::scoring::{QueryContext, RelevanceScorer, RATING_SCALE_MAX};
