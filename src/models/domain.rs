use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::coordinate::GeoCoordinate;

/// Category of a cultural heritage site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SiteType {
    Museum,
    ArchaeologicalSite,
    HistoricalBuilding,
    Monument,
    CulturalLandscape,
}

impl SiteType {
    pub const ALL: [SiteType; 5] = [
        SiteType::Museum,
        SiteType::ArchaeologicalSite,
        SiteType::HistoricalBuilding,
        SiteType::Monument,
        SiteType::CulturalLandscape,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteType::Museum => "MUSEUM",
            SiteType::ArchaeologicalSite => "ARCHAEOLOGICAL_SITE",
            SiteType::HistoricalBuilding => "HISTORICAL_BUILDING",
            SiteType::Monument => "MONUMENT",
            SiteType::CulturalLandscape => "CULTURAL_LANDSCAPE",
        }
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `MUSEUM`, `museum`, `Archaeological Site` and `archaeological-site`.
impl FromStr for SiteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();

        SiteType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| format!("unknown site type '{}'", s))
    }
}

/// A point of interest supplied by the catalog
///
/// Immutable for the duration of a query. `average_rating` is on the scale
/// configured by `rating_scale_max`; the ranking engine rejects sites that
/// fall outside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub site_type: SiteType,
    pub location: GeoCoordinate,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
}

impl Site {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        site_type: SiteType,
        location: GeoCoordinate,
        average_rating: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            site_type,
            location,
            average_rating,
        }
    }
}

/// What the tourist is looking for, and where they are
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Case-insensitive substring matched against `Site::name`
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(rename = "siteType", default)]
    pub site_type: Option<SiteType>,
    /// Hard cutoff, same scale as `Site::average_rating`
    #[serde(rename = "minRating", default)]
    pub min_rating: f64,
    #[serde(rename = "userLatitude")]
    pub user_latitude: f64,
    #[serde(rename = "userLongitude")]
    pub user_longitude: f64,
    /// Optional hard radius around the user
    #[serde(rename = "maxDistanceKm", default)]
    pub max_distance_km: Option<f64>,
    /// Keep at most this many results after ranking
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SearchCriteria {
    /// Criteria with only a position; every other field is unset.
    pub fn at(user_latitude: f64, user_longitude: f64) -> Self {
        Self {
            keywords: None,
            site_type: None,
            min_rating: 0.0,
            user_latitude,
            user_longitude,
            max_distance_km: None,
            limit: None,
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_site_type(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_max_distance_km(mut self, max_distance_km: f64) -> Self {
        self.max_distance_km = Some(max_distance_km);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Keyword text as given, `None` when absent or empty
    ///
    /// Whitespace is significant: `"forum "` only matches names containing
    /// `"forum "`.
    pub fn keyword_text(&self) -> Option<&str> {
        self.keywords.as_deref().filter(|k| !k.is_empty())
    }
}

/// A site that survived filtering, with the values it was ranked on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSite {
    pub site: Site,
    pub score: f64,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// Scoring weights
///
/// Bonuses are additive; the quality term is always `rating / rating_scale_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub keyword: f64,
    pub site_type: f64,
    pub near: f64,
    pub nearby: f64,
    pub near_radius_km: f64,
    pub nearby_radius_km: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword: 0.5,
            site_type: 0.3,
            near: 0.2,
            nearby: 0.1,
            near_radius_km: 1.0,
            nearby_radius_km: 5.0,
        }
    }
}
