use crate::core::coordinate::{BoundingBox, GeoCoordinate};
use crate::error::{RankingError, Result};
use crate::models::{SearchCriteria, Site};

/// Check the criteria against the rating scale.
///
/// `min_rating` must be finite and inside `[0, rating_scale_max]`; a radius,
/// when given, must be finite and non-negative.
pub fn validate_criteria(criteria: &SearchCriteria, rating_scale_max: f64) -> Result<()> {
    let min = criteria.min_rating;
    if !min.is_finite() || min < 0.0 || min > rating_scale_max {
        return Err(RankingError::InvalidCriteria(format!(
            "minRating {} is outside the rating scale [0, {}]",
            min, rating_scale_max
        )));
    }

    if let Some(radius) = criteria.max_distance_km {
        if !radius.is_finite() || radius < 0.0 {
            return Err(RankingError::InvalidCriteria(format!(
                "maxDistanceKm {} must be a non-negative number",
                radius
            )));
        }
    }

    Ok(())
}

/// Check a candidate's rating against the rating scale.
pub fn validate_site(site: &Site, rating_scale_max: f64) -> Result<()> {
    let rating = site.average_rating;
    if !rating.is_finite() || rating < 0.0 || rating > rating_scale_max {
        return Err(RankingError::InvalidSite {
            id: site.id.clone(),
            reason: format!(
                "averageRating {} is outside the rating scale [0, {}]",
                rating, rating_scale_max
            ),
        });
    }
    Ok(())
}

/// Hard rating cutoff
///
/// Sites below `min_rating` never reach scoring.
#[inline]
pub fn meets_min_rating(site: &Site, criteria: &SearchCriteria) -> bool {
    site.average_rating >= criteria.min_rating
}

/// Optional hard radius around the user
///
/// The bounding box rejects far-away sites before any trigonometry; survivors
/// are checked with the exact Haversine distance.
#[derive(Debug, Clone, Copy)]
pub struct RadiusFilter {
    center: GeoCoordinate,
    radius_km: f64,
    bounding_box: BoundingBox,
}

impl RadiusFilter {
    pub fn new(center: GeoCoordinate, radius_km: f64) -> Self {
        Self {
            center,
            radius_km,
            bounding_box: BoundingBox::around(&center, radius_km),
        }
    }

    /// Distance to `site` when it is inside the radius, `None` otherwise.
    #[inline]
    pub fn distance_within(&self, site: &Site) -> Option<f64> {
        if !self.bounding_box.contains(&site.location) {
            return None;
        }
        let distance_km = self.center.distance_to(&site.location);
        (distance_km <= self.radius_km).then_some(distance_km)
    }
}
