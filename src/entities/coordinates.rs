use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometers, by the Haversine
    /// formula. Pure math, no range validation; callers own their inputs.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let lat_a = self.latitude.to_radians();
        let lat_b = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let h = (d_lat / 2.0).sin().powi(2)
            + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

        EARTH_RADIUS_KM * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_zero_for_identical_points() {
        let a = Coordinates::new(12.9716, 77.5946);

        assert_eq!(a.distance_km(&a), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates::new(12.9716, 77.5946);
        let b = Coordinates::new(13.0827, 80.2707);

        assert_eq!(a.distance_km(&b), b.distance_km(&a));
    }

    #[test]
    fn quarter_great_circle_along_equator() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 90.0);

        let distance = a.distance_km(&b);
        assert!((distance - 10007.5).abs() < 1.0, "got {}", distance);
    }

    #[test]
    fn distance_grows_with_separation() {
        let origin = Coordinates::new(0.0, 0.0);
        let near = Coordinates::new(0.0, 1.0);
        let far = Coordinates::new(0.0, 2.0);

        assert!(origin.distance_km(&near) < origin.distance_km(&far));
    }

    #[test]
    fn out_of_range_degrees_still_produce_a_number() {
        let a = Coordinates::new(120.0, 500.0);
        let b = Coordinates::new(-95.0, -270.0);

        assert!(a.distance_km(&b).is_finite());
    }
}
