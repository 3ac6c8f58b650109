use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

pub const BASE_FARE: f64 = 5.0;
pub const RATE_PER_KM: f64 = 2.0;

fn identity_factor() -> f64 {
    1.0
}

// wire names are camelCase, matching the mobile clients
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingFactors {
    #[serde(default = "identity_factor")]
    pub traffic_factor: f64,
    #[serde(default = "identity_factor")]
    pub weather_factor: f64,
    #[serde(default = "identity_factor")]
    pub time_factor: f64,
}

impl Default for PricingFactors {
    fn default() -> Self {
        Self {
            traffic_factor: 1.0,
            weather_factor: 1.0,
            time_factor: 1.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    pub distance_km: f64,
    pub price: f64,
}

impl Quote {
    pub fn price_string(&self) -> String {
        format!("{:.2}", self.price)
    }
}

/// Computes a fare quote for the given trip. Pure; the layered multipliers
/// are taken at face value, so a non-positive surge or factor yields a
/// non-positive price which the request boundary must reject.
pub fn estimate(
    pickup: &Coordinates,
    destination: &Coordinates,
    surge_multiplier: f64,
    factors: &PricingFactors,
) -> Quote {
    let distance_km = pickup.distance_km(destination);

    let fare = (BASE_FARE + distance_km * RATE_PER_KM)
        * surge_multiplier
        * factors.traffic_factor
        * factors.weather_factor
        * factors.time_factor;

    Quote {
        distance_km,
        price: (fare * 100.0).round() / 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pickup() -> Coordinates {
        Coordinates::new(12.9716, 77.5946)
    }

    fn destination() -> Coordinates {
        Coordinates::new(12.2958, 76.6394)
    }

    #[test]
    fn zero_distance_trip_charges_the_base_fare() {
        let point = pickup();
        let quote = estimate(&point, &point, 1.0, &PricingFactors::default());

        assert_eq!(quote.distance_km, 0.0);
        assert_eq!(quote.price, 5.0);
        assert_eq!(quote.price_string(), "5.00");
    }

    #[test]
    fn factors_compose_multiplicatively() {
        let base = estimate(&pickup(), &destination(), 1.0, &PricingFactors::default());

        let factors = PricingFactors {
            traffic_factor: 1.5,
            ..PricingFactors::default()
        };
        let surged = estimate(&pickup(), &destination(), 2.0, &factors);

        // each side is rounded independently, so allow a cent of drift
        assert!((surged.price - base.price * 2.0 * 1.5).abs() <= 0.02);
    }

    #[test]
    fn price_is_rounded_to_two_decimal_places() {
        let quote = estimate(&pickup(), &destination(), 1.337, &PricingFactors::default());

        let cents = quote.price * 100.0;
        assert!((cents - cents.round()).abs() < 1e-9);
    }

    #[test]
    fn missing_factors_deserialize_to_identity() {
        let factors: PricingFactors = serde_json::from_str("{}").unwrap();

        assert_eq!(factors.traffic_factor, 1.0);
        assert_eq!(factors.weather_factor, 1.0);
        assert_eq!(factors.time_factor, 1.0);
    }

    #[test]
    fn factors_accept_camel_case_wire_names() {
        let factors: PricingFactors =
            serde_json::from_str(r#"{"trafficFactor": 1.2, "timeFactor": 0.9}"#).unwrap();

        assert_eq!(factors.traffic_factor, 1.2);
        assert_eq!(factors.weather_factor, 1.0);
        assert_eq!(factors.time_factor, 0.9);
    }

    #[test]
    fn non_positive_surge_passes_through_unguarded() {
        let quote = estimate(&pickup(), &destination(), 0.0, &PricingFactors::default());

        assert_eq!(quote.price, 0.0);
    }
}
