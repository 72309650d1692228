use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{SearchCriteria, SiteType};

/// Search request as submitted by the presenter layer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(alias = "site_type", rename = "siteType", default)]
    pub site_type: Option<SiteType>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "min_rating", rename = "minRating", default)]
    pub min_rating: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(alias = "latitude", rename = "userLatitude")]
    pub user_latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(alias = "longitude", rename = "userLongitude")]
    pub user_longitude: f64,
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_distance_km", rename = "maxDistanceKm", default)]
    pub max_distance_km: Option<f64>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
}

impl From<SearchRequest> for SearchCriteria {
    fn from(request: SearchRequest) -> Self {
        Self {
            keywords: request.keywords,
            site_type: request.site_type,
            min_rating: request.min_rating,
            user_latitude: request.user_latitude,
            user_longitude: request.user_longitude,
            max_distance_km: request.max_distance_km,
            limit: request.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SearchRequest {
        SearchRequest {
            keywords: Some("roman".to_string()),
            site_type: Some(SiteType::Museum),
            min_rating: 5.0,
            user_latitude: 41.8933,
            user_longitude: 12.4854,
            max_distance_km: None,
            limit: Some(10),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_latitude() {
        let mut req = request();
        req.user_latitude = 95.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_limit() {
        let mut req = request();
        req.limit = Some(0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_accepts_snake_case_aliases() {
        let json = r#"{"latitude": 41.9, "longitude": 12.5, "min_rating": 3.5, "site_type": "MONUMENT"}"#;
        let req: SearchRequest = serde_json::from_str(json).unwrap();
        let criteria = SearchCriteria::from(req);
        assert_eq!(criteria.min_rating, 3.5);
        assert_eq!(criteria.site_type, Some(SiteType::Monument));
    }
}
