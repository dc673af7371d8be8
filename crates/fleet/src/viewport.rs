use model::point::GeoPoint;
use serde::Serialize;

pub const DEFAULT_ZOOM: u8 = 13;
/// Zoom applied when jumping to a single looked-up place.
pub const FOCUS_ZOOM: u8 = 16;

/// Directive consumed by the map layer: where to look and how closely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Viewport {
    /// The product's home view over San Francisco.
    pub fn home() -> Self {
        Self {
            center: GeoPoint::new(37.7749, -122.4194),
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn focus(center: GeoPoint) -> Self {
        Self {
            center,
            zoom: FOCUS_ZOOM,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::home()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_is_san_francisco() {
        let home = Viewport::home();
        assert_eq!(home.center, GeoPoint::new(37.7749, -122.4194));
        assert_eq!(home.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn focus_zooms_in() {
        let focus = Viewport::focus(GeoPoint::new(37.7955, -122.3937));
        assert!(focus.zoom > Viewport::home().zoom);
    }
}
