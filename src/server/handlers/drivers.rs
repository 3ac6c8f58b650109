use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::DynAPI;
use crate::auth::User;
use crate::entities::{Driver, Ride};
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

pub async fn register(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<RegisterParams>,
) -> Result<Json<Value>, Error> {
    api.register_driver_phone(params.phone).await?;

    Ok(Json(json!({ "success": true })))
}

pub async fn verify_otp(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<VerifyOtpParams>,
) -> Result<Json<Value>, Error> {
    let (driver, token) = api.verify_driver_phone(params.phone, params.code).await?;

    Ok(Json(
        json!({ "success": true, "token": token, "driver": driver }),
    ))
}

pub async fn request_email_otp(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<EmailOtpParams>,
) -> Result<Json<Value>, Error> {
    let envelope = api
        .request_driver_email_code(params.email, params.first_name, params.last_name)
        .await?;

    Ok(Json(json!({ "success": true, "envelope": envelope })))
}

pub async fn verify_email_otp(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<VerifyEmailOtpParams>,
) -> Result<Json<Value>, Error> {
    let (driver, token) = api
        .verify_driver_email_code(params.envelope, params.code)
        .await?;

    Ok(Json(
        json!({ "success": true, "token": token, "driver": driver }),
    ))
}

pub async fn me(Extension(api): Extension<DynAPI>, user: User) -> Result<Json<Driver>, Error> {
    let driver = api.find_driver(user).await?;

    Ok(driver.into())
}

pub async fn rides(Extension(api): Extension<DynAPI>, user: User) -> Result<Json<Vec<Ride>>, Error> {
    let rides = api.list_driver_rides(user).await?;

    Ok(rides.into())
}

pub async fn accept_ride(
    Extension(api): Extension<DynAPI>,
    user: User,
    Path(id): Path<Uuid>,
) -> Result<Json<Ride>, Error> {
    let ride = api.accept_ride(user, id).await?;

    Ok(ride.into())
}

pub async fn start_ride(
    Extension(api): Extension<DynAPI>,
    user: User,
    Path(id): Path<Uuid>,
) -> Result<Json<Ride>, Error> {
    let ride = api.start_ride(user, id).await?;

    Ok(ride.into())
}

pub async fn complete_ride(
    Extension(api): Extension<DynAPI>,
    user: User,
    Path(id): Path<Uuid>,
) -> Result<Json<Ride>, Error> {
    let ride = api.complete_ride(user, id).await?;

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
