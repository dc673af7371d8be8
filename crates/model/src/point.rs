use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo;

/// Decimal places kept by the privacy mask; a two-place grid is roughly
/// 1.1 km wide at San Francisco latitudes.
pub const MASK_DECIMAL_PLACES: u32 = 2;

/// A latitude/longitude pair in decimal degrees. Pure value, no identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        geo::haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    /// Snaps the point onto the reduced-precision privacy grid. Lossy,
    /// one-way.
    pub fn snapped(self) -> Self {
        Self {
            latitude: geo::round_to_places(self.latitude, MASK_DECIMAL_PLACES),
            longitude: geo::round_to_places(self.longitude, MASK_DECIMAL_PLACES),
        }
    }

    /// Privacy mask applied at the display/export boundary. The stored
    /// precise coordinate is shadowed, never replaced.
    pub fn masked(self, privacy_enabled: bool) -> Self {
        if privacy_enabled {
            self.snapped()
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_disabled_is_identity() {
        let point = GeoPoint::new(37.774921, -122.419412);
        assert_eq!(point.masked(false), point);
    }

    #[test]
    fn mask_enabled_snaps_to_two_places() {
        let masked = GeoPoint::new(37.774921, -122.419412).masked(true);
        assert_eq!(masked, GeoPoint::new(37.77, -122.42));
    }

    #[test]
    fn mask_is_idempotent() {
        let snapped = GeoPoint::new(37.774921, -122.419412).snapped();
        assert_eq!(snapped.snapped(), snapped);
    }

    #[test]
    fn distance_between_fixed_points() {
        let a = GeoPoint::new(37.7749, -122.4194);
        let b = GeoPoint::new(37.7849, -122.4294);
        assert!((a.distance_km(&b) - 1.4173).abs() < 1e-3);
    }
}
