use super::helpers::{fetch_ride_for_update, update_ride};
use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Acquire, Executor, Row};
use uuid::Uuid;

use crate::{
    api::{FareAPI, RideAPI},
    auth::{Role, User},
    entities::{Coordinates, PricingFactors, Ride},
    error::{unauthorized_error, Error},
};

#[async_trait]
impl RideAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn request_ride(
        &self,
        user: User,
        pickup: Coordinates,
        destination: Coordinates,
        surge_multiplier: f64,
        factors: PricingFactors,
    ) -> Result<Ride, Error> {
        // quoting enforces the rider role and multiplier bounds
        let quote = self
            .quote_fare(user, pickup, destination, surge_multiplier, factors)
            .await?;

        let ride = Ride::new(user.id, pickup, destination, quote.price);

        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query(
                "INSERT INTO rides (id, rider_id, driver_id, status, data) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&ride.id)
            .bind(&ride.rider_id)
            .bind(&ride.driver_id)
            .bind(ride.status.name())
            .bind(Json(&ride)),
        )
        .await?;

        tracing::info!(ride_id = %ride.id, "ride requested");

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn list_rider_rides(&self, user: User) -> Result<Vec<Ride>, Error> {
        self.authorize(&user, Role::Rider)?;

        let mut conn = self.pool.acquire().await?;

        let results = conn
            .fetch_all(sqlx::query("SELECT data FROM rides WHERE rider_id = $1").bind(&user.id))
            .await?;

        let mut rides = Vec::with_capacity(results.len());
        for result in results.iter() {
            let Json(ride) = result.try_get("data")?;
            rides.push(ride);
        }

        Ok(rides)
    }

    #[tracing::instrument(skip(self))]
    async fn list_driver_rides(&self, user: User) -> Result<Vec<Ride>, Error> {
        self.authorize(&user, Role::Driver)?;

        let mut conn = self.pool.acquire().await?;

        // open requests plus everything already assigned to this driver
        let results = conn
            .fetch_all(
                sqlx::query("SELECT data FROM rides WHERE status = 'requested' OR driver_id = $1")
                    .bind(&user.id),
            )
            .await?;

        let mut rides = Vec::with_capacity(results.len());
        for result in results.iter() {
            let Json(ride) = result.try_get("data")?;
            rides.push(ride);
        }

        Ok(rides)
    }

    #[tracing::instrument(skip(self))]
    async fn accept_ride(&self, user: User, id: Uuid) -> Result<Ride, Error> {
        self.authorize(&user, Role::Driver)?;

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut ride = fetch_ride_for_update(&mut tx, &id).await?;

        ride.accept(user.id)?;
        update_ride(&mut tx, &ride).await?;

        tx.commit().await?;

        tracing::info!(ride_id = %ride.id, driver_id = %user.id, "ride accepted");

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn start_ride(&self, user: User, id: Uuid) -> Result<Ride, Error> {
        self.authorize(&user, Role::Driver)?;

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut ride = fetch_ride_for_update(&mut tx, &id).await?;

        if ride.driver_id != Some(user.id) {
            return Err(unauthorized_error());
        }

        ride.start()?;
        update_ride(&mut tx, &ride).await?;

        tx.commit().await?;

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn complete_ride(&self, user: User, id: Uuid) -> Result<Ride, Error> {
        self.authorize(&user, Role::Driver)?;

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut ride = fetch_ride_for_update(&mut tx, &id).await?;

        if ride.driver_id != Some(user.id) {
            return Err(unauthorized_error());
        }

        ride.complete()?;
        update_ride(&mut tx, &ride).await?;

        tx.commit().await?;

        tracing::info!(ride_id = %ride.id, "ride completed");

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_ride(&self, user: User, id: Uuid) -> Result<Ride, Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut ride = fetch_ride_for_update(&mut tx, &id).await?;

        let owns_ride = match user.role {
            Role::Rider => ride.rider_id == user.id,
            Role::Driver => ride.driver_id == Some(user.id),
        };
        if !owns_ride {
            return Err(unauthorized_error());
        }

        ride.cancel()?;
        update_ride(&mut tx, &ride).await?;

        tx.commit().await?;

        tracing::info!(ride_id = %ride.id, "ride cancelled");

        Ok(ride)
    }
}
