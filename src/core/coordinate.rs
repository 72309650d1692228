use serde::{Deserialize, Serialize};

use crate::error::{RankingError, Result};

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated WGS84 position, in degrees.
///
/// Construction rejects non-finite values and anything outside
/// `[-90, 90]` latitude or `[-180, 180]` longitude, so every
/// `GeoCoordinate` in the system is known to be on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = RankingError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoCoordinate {
    /// Create a coordinate, failing with `InvalidCoordinate` when out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);

        if !lat_ok || !lon_ok {
            return Err(RankingError::InvalidCoordinate { latitude, longitude });
        }

        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometers (Haversine formula).
    #[inline]
    pub fn distance_to(&self, other: &GeoCoordinate) -> f64 {
        haversine_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

impl From<GeoCoordinate> for ::geo::Point<f64> {
    fn from(coord: GeoCoordinate) -> Self {
        ::geo::Point::new(coord.longitude, coord.latitude)
    }
}

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1.0 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Box that fully encloses the circle of `radius_km` around `center`.
    ///
    /// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude). The box is
    /// only a cheap pre-filter, so it errs on the side of being too large: near
    /// the poles, or when the radius spans the antimeridian, it widens to the
    /// full longitude range.
    pub fn around(center: &GeoCoordinate, radius_km: f64) -> Self {
        // 1 degree latitude is approximately 111 km; pad by 1% for the approximation
        let lat_delta = radius_km / 111.0 * 1.01;

        let min_lat = (center.latitude - lat_delta).max(-90.0);
        let max_lat = (center.latitude + lat_delta).min(90.0);

        // Use the widest parallel inside the box so the longitude span is never short
        let widest_lat = min_lat.abs().max(max_lat.abs());
        let cos_lat = widest_lat.to_radians().cos();

        let (min_lon, max_lon) = if cos_lat <= f64::EPSILON {
            (-180.0, 180.0)
        } else {
            let lon_delta = radius_km / (111.0 * cos_lat) * 1.01;
            let min_lon = center.longitude - lon_delta;
            let max_lon = center.longitude + lon_delta;
            if min_lon < -180.0 || max_lon > 180.0 {
                (-180.0, 180.0)
            } else {
                (min_lon, max_lon)
            }
        };

        Self { min_lat, max_lat, min_lon, max_lon }
    }

    /// Check if a point is within the box
    #[inline]
    pub fn contains(&self, coord: &GeoCoordinate) -> bool {
        coord.latitude >= self.min_lat
            && coord.latitude <= self.max_lat
            && coord.longitude >= self.min_lon
            && coord.longitude <= self.max_lon
    }
}
