use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::User;
use crate::entities::{Coordinates, Driver, PricingFactors, Quote, Ride, Rider};
use crate::error::Error;

#[async_trait]
pub trait FareAPI {
    async fn quote_fare(
        &self,
        user: User,
        pickup: Coordinates,
        destination: Coordinates,
        surge_multiplier: f64,
        factors: PricingFactors,
    ) -> Result<Quote, Error>;
}

#[async_trait]
pub trait RiderAPI {
    async fn register_rider_phone(&self, phone: String) -> Result<(), Error>;

    async fn verify_rider_phone(
        &self,
        phone: String,
        code: String,
    ) -> Result<(Rider, String), Error>;

    async fn request_rider_email_code(
        &self,
        email: String,
        first_name: String,
        last_name: String,
    ) -> Result<String, Error>;

    async fn verify_rider_email_code(
        &self,
        envelope: String,
        code: String,
    ) -> Result<(Rider, String), Error>;

    async fn find_rider(&self, user: User) -> Result<Rider, Error>;
}

#[async_trait]
pub trait DriverAPI {
    async fn register_driver_phone(&self, phone: String) -> Result<(), Error>;

    async fn verify_driver_phone(
        &self,
        phone: String,
        code: String,
    ) -> Result<(Driver, String), Error>;

    async fn request_driver_email_code(
        &self,
        email: String,
        first_name: String,
        last_name: String,
    ) -> Result<String, Error>;

    async fn verify_driver_email_code(
        &self,
        envelope: String,
        code: String,
    ) -> Result<(Driver, String), Error>;

    async fn find_driver(&self, user: User) -> Result<Driver, Error>;
}

#[async_trait]
pub trait RideAPI {
    async fn request_ride(
        &self,
        user: User,
        pickup: Coordinates,
        destination: Coordinates,
        surge_multiplier: f64,
        factors: PricingFactors,
    ) -> Result<Ride, Error>;

    async fn list_rider_rides(&self, user: User) -> Result<Vec<Ride>, Error>;

    async fn list_driver_rides(&self, user: User) -> Result<Vec<Ride>, Error>;

    async fn accept_ride(&self, user: User, id: Uuid) -> Result<Ride, Error>;

    async fn start_ride(&self, user: User, id: Uuid) -> Result<Ride, Error>;

    async fn complete_ride(&self, user: User, id: Uuid) -> Result<Ride, Error>;

    async fn cancel_ride(&self, user: User, id: Uuid) -> Result<Ride, Error>;
}

pub trait API: FareAPI + RiderAPI + DriverAPI + RideAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
