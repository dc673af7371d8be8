pub const EARTH_RADIUS_KM: f64 = 6371.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance in kilometers between two coordinate pairs,
/// using the haversine formula on a mean earth radius.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Rounds a coordinate component to the given number of decimal places.
/// Lossy and one-way. Two places put the value on a grid of roughly
/// 1.1 km at San Francisco latitudes.
pub fn round_to_places(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let d = haversine_distance(37.7749, -122.4194, 37.7749, -122.4194);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn distance_across_san_francisco() {
        // regression fixture, pinned against an independent computation
        let d = haversine_distance(37.7749, -122.4194, 37.7849, -122.4294);
        assert!((d - 1.4173).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_distance(37.778, -122.422, 37.772, -122.416);
        let back = haversine_distance(37.772, -122.416, 37.778, -122.422);
        assert!((there - back).abs() < 1e-12);
    }

    #[test]
    fn rounding_to_two_places() {
        assert_eq!(round_to_places(37.774921, 2), 37.77);
        assert_eq!(round_to_places(-122.419412, 2), -122.42);
    }

    #[test]
    fn rounding_to_zero_places() {
        assert_eq!(round_to_places(37.5, 0), 38.0);
    }
}
