use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::point::GeoPoint;
use crate::{SeedData, WithId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum GeofenceKind {
    Security,
    Delivery,
    Restricted,
}

/// A named polygonal boundary. Only the polygon data lives here; breach
/// detection is not part of this core. Fences may overlap freely.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Geofence {
    pub name: String,
    /// Ordered ring of at least three vertices, not explicitly closed.
    pub points: Vec<GeoPoint>,
    pub kind: GeofenceKind,
    /// Nominal radius in meters, used for display text only.
    pub radius_m: f64,
}

impl HasId for Geofence {
    type IdType = String;
}

impl Geofence {
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 3
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }
}

impl SeedData for Geofence {
    fn seed_data() -> Vec<WithId<Self>> {
        vec![
            WithId::new(
                Id::new("gf-1".to_owned()),
                Geofence {
                    name: "Main Depot".to_owned(),
                    points: vec![
                        GeoPoint::new(37.778, -122.422),
                        GeoPoint::new(37.778, -122.416),
                        GeoPoint::new(37.772, -122.416),
                        GeoPoint::new(37.772, -122.422),
                    ],
                    kind: GeofenceKind::Security,
                    radius_m: 450.0,
                },
            ),
            WithId::new(
                Id::new("gf-2".to_owned()),
                Geofence {
                    name: "Restricted Zone B".to_owned(),
                    points: vec![
                        GeoPoint::new(37.765, -122.492),
                        GeoPoint::new(37.775, -122.482),
                        GeoPoint::new(37.765, -122.472),
                    ],
                    kind: GeofenceKind::Restricted,
                    radius_m: 800.0,
                },
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_fences_are_valid_polygons() {
        for fence in Geofence::seed_data() {
            assert!(fence.content.is_valid(), "{} too small", fence.content.name);
        }
    }

    #[test]
    fn triangle_is_the_smallest_fence() {
        let mut fence = Geofence::seed_data().remove(1).content;
        assert_eq!(fence.vertex_count(), 3);
        fence.points.pop();
        assert!(!fence.is_valid());
    }
}
