use super::Engine;

use async_trait::async_trait;

use crate::{
    api::FareAPI,
    auth::{Role, User},
    entities::{fare, Coordinates, PricingFactors, Quote},
    error::{invalid_input_error, Error},
};

#[async_trait]
impl FareAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn quote_fare(
        &self,
        user: User,
        pickup: Coordinates,
        destination: Coordinates,
        surge_multiplier: f64,
        factors: PricingFactors,
    ) -> Result<Quote, Error> {
        self.authorize(&user, Role::Rider)?;

        // the estimator itself takes multipliers at face value, so reject
        // anything that would produce a non-positive price here
        if surge_multiplier <= 0.0
            || factors.traffic_factor <= 0.0
            || factors.weather_factor <= 0.0
            || factors.time_factor <= 0.0
        {
            return Err(invalid_input_error());
        }

        Ok(fare::estimate(
            &pickup,
            &destination,
            surge_multiplier,
            &factors,
        ))
    }
}
