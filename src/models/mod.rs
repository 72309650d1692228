// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{RankedSite, ScoringWeights, SearchCriteria, Site, SiteType};
pub use requests::SearchRequest;
pub use responses::{ErrorResponse, SearchResponse};
