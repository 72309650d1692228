use serde::{Deserialize, Serialize};

use crate::models::domain::RankedSite;

/// Response handed to the presenter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<RankedSite>,
    pub total_candidates: usize,
    pub filtered_out: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
