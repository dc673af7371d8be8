use chrono::{DateTime, Duration, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::point::GeoPoint;
use crate::{SeedData, WithId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Active,
    Idle,
    Warning,
}

/// Delivery progression. Variant order is the progression order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Milestone {
    Warehouse,
    Transit,
    LastMile,
    Delivered,
}

impl Milestone {
    /// Fraction of the milestone bar this stage fills.
    pub fn progress(&self) -> f64 {
        match self {
            Milestone::Warehouse => 0.25,
            Milestone::Transit => 0.5,
            Milestone::LastMile => 0.75,
            Milestone::Delivered => 1.0,
        }
    }
}

/// A tracked, moving entity (vehicle or package). Created from the seed
/// set at startup, mutated in place by the simulator, never deleted
/// within a session.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackedAsset {
    pub name: String,
    pub position: GeoPoint,
    pub status: AssetStatus,
    pub speed_mph: u32,
    pub last_seen: DateTime<Local>,
    pub order_id: Option<String>,
    pub milestone: Option<Milestone>,
}

impl HasId for TrackedAsset {
    type IdType = String;
}

impl TrackedAsset {
    pub fn is_idle(&self) -> bool {
        self.status == AssetStatus::Idle
    }

    pub fn distance_to(&self, point: &GeoPoint) -> f64 {
        self.position.distance_km(point)
    }

    /// Relative freshness label shown next to the asset ("now", "2m ago").
    pub fn freshness(&self, now: DateTime<Local>) -> String {
        let elapsed = now.signed_duration_since(self.last_seen);
        if elapsed.num_seconds() < 60 {
            "now".to_owned()
        } else if elapsed.num_minutes() < 60 {
            format!("{}m ago", elapsed.num_minutes())
        } else {
            format!("{}h ago", elapsed.num_hours())
        }
    }
}

impl SeedData for TrackedAsset {
    fn seed_data() -> Vec<WithId<Self>> {
        let now = Local::now();
        vec![
            WithId::new(
                Id::new("1".to_owned()),
                TrackedAsset {
                    name: "Fleet-A-01".to_owned(),
                    position: GeoPoint::new(37.7749, -122.4194),
                    status: AssetStatus::Active,
                    speed_mph: 45,
                    last_seen: now,
                    order_id: Some("ORD-9921".to_owned()),
                    milestone: Some(Milestone::LastMile),
                },
            ),
            WithId::new(
                Id::new("2".to_owned()),
                TrackedAsset {
                    name: "Fleet-A-04".to_owned(),
                    position: GeoPoint::new(37.7833, -122.4167),
                    status: AssetStatus::Warning,
                    speed_mph: 12,
                    last_seen: now - Duration::minutes(2),
                    order_id: Some("ORD-8812".to_owned()),
                    milestone: Some(Milestone::Transit),
                },
            ),
            WithId::new(
                Id::new("3".to_owned()),
                TrackedAsset {
                    name: "Delivery-X".to_owned(),
                    position: GeoPoint::new(37.7694, -122.4862),
                    status: AssetStatus::Active,
                    speed_mph: 28,
                    last_seen: now - Duration::seconds(10),
                    order_id: Some("ORD-7763".to_owned()),
                    milestone: Some(Milestone::LastMile),
                },
            ),
            WithId::new(
                Id::new("4".to_owned()),
                TrackedAsset {
                    name: "Van-Global".to_owned(),
                    position: GeoPoint::new(37.7394, -122.4194),
                    status: AssetStatus::Idle,
                    speed_mph: 0,
                    last_seen: now - Duration::minutes(15),
                    order_id: Some("ORD-1102".to_owned()),
                    milestone: Some(Milestone::Warehouse),
                },
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestones_progress_in_order() {
        assert!(Milestone::Warehouse < Milestone::Transit);
        assert!(Milestone::Transit < Milestone::LastMile);
        assert!(Milestone::LastMile < Milestone::Delivered);
        assert_eq!(Milestone::Delivered.progress(), 1.0);
    }

    #[test]
    fn seed_fleet_has_one_idle_asset() {
        let seed = TrackedAsset::seed_data();
        assert_eq!(seed.len(), 4);
        let idle = seed.iter().filter(|a| a.content.is_idle()).count();
        assert_eq!(idle, 1);
    }

    #[test]
    fn freshness_labels() {
        let now = Local::now();
        let mut asset = TrackedAsset::seed_data().remove(0).content;

        asset.last_seen = now;
        assert_eq!(asset.freshness(now), "now");

        asset.last_seen = now - Duration::minutes(2);
        assert_eq!(asset.freshness(now), "2m ago");

        asset.last_seen = now - Duration::hours(3);
        assert_eq!(asset.freshness(now), "3h ago");
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&AssetStatus::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        let json = serde_json::to_string(&Milestone::LastMile).unwrap();
        assert_eq!(json, "\"last-mile\"");
    }
}
