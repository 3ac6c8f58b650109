use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::DynAPI;
use crate::auth::User;
use crate::entities::{Coordinates, PricingFactors, Ride, Rider};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct RegisterParams {
    phone: String,
}

#[derive(Serialize, Deserialize)]
pub struct VerifyOtpParams {
    phone: String,
    code: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailOtpParams {
    email: String,
    first_name: String,
    last_name: String,
}

#[derive(Serialize, Deserialize)]
pub struct VerifyEmailOtpParams {
    envelope: String,
    code: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRideParams {
    pickup: Coordinates,
    destination: Coordinates,
    surge_multiplier: f64,
    #[serde(flatten)]
    factors: PricingFactors,
}

pub async fn register(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<RegisterParams>,
) -> Result<Json<Value>, Error> {
    api.register_rider_phone(params.phone).await?;

    Ok(Json(json!({ "success": true })))
}

pub async fn verify_otp(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<VerifyOtpParams>,
) -> Result<Json<Value>, Error> {
    let (rider, token) = api.verify_rider_phone(params.phone, params.code).await?;

    Ok(Json(json!({ "success": true, "token": token, "rider": rider })))
}

pub async fn request_email_otp(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<EmailOtpParams>,
) -> Result<Json<Value>, Error> {
    let envelope = api
        .request_rider_email_code(params.email, params.first_name, params.last_name)
        .await?;

    Ok(Json(json!({ "success": true, "envelope": envelope })))
}

pub async fn verify_email_otp(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<VerifyEmailOtpParams>,
) -> Result<Json<Value>, Error> {
    let (rider, token) = api
        .verify_rider_email_code(params.envelope, params.code)
        .await?;

    Ok(Json(json!({ "success": true, "token": token, "rider": rider })))
}

pub async fn me(Extension(api): Extension<DynAPI>, user: User) -> Result<Json<Rider>, Error> {
    let rider = api.find_rider(user).await?;

    Ok(rider.into())
}

pub async fn rides(Extension(api): Extension<DynAPI>, user: User) -> Result<Json<Vec<Ride>>, Error> {
    let rides = api.list_rider_rides(user).await?;

    Ok(rides.into())
}

pub async fn request_ride(
    Extension(api): Extension<DynAPI>,
    user: User,
    Json(params): Json<RequestRideParams>,
) -> Result<Json<Ride>, Error> {
    let ride = api
        .request_ride(
            user,
            params.pickup,
            params.destination,
            params.surge_multiplier,
            params.factors,
        )
        .await?;

    Ok(ride.into())
}

pub async fn cancel_ride(
    Extension(api): Extension<DynAPI>,
    user: User,
    Path(id): Path<Uuid>,
) -> Result<Json<Ride>, Error> {
    let ride = api.cancel_ride(user, id).await?;

    Ok(ride.into())
}
