mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post, put},
    Router,
};

use crate::api::{API, DynAPI};
use crate::auth::Signer;
use crate::server::handlers::{drivers, fares, riders};

pub async fn serve<T: API + Sync + Send + 'static>(api: T, signer: Signer, addr: SocketAddr) {
    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/api/rider/registration", post(riders::register))
        .route("/api/rider/verify-otp", post(riders::verify_otp))
        .route("/api/rider/email-otp-request", post(riders::request_email_otp))
        .route("/api/rider/email-otp-verify", put(riders::verify_email_otp))
        .route("/api/rider/me", get(riders::me))
        .route("/api/rider/get-rides", get(riders::rides))
        .route("/api/rider/ride-price", post(fares::quote))
        .route("/api/rider/request-ride", post(riders::request_ride))
        .route("/api/rider/rides/:id/cancel", patch(riders::cancel_ride))
        .route("/api/driver/registration", post(drivers::register))
        .route("/api/driver/verify-otp", post(drivers::verify_otp))
        .route(
            "/api/driver/email-otp-request",
            post(drivers::request_email_otp),
        )
        .route(
            "/api/driver/email-otp-verify",
            put(drivers::verify_email_otp),
        )
        .route("/api/driver/me", get(drivers::me))
        .route("/api/driver/get-rides", get(drivers::rides))
        .route("/api/driver/rides/:id/accept", patch(drivers::accept_ride))
        .route("/api/driver/rides/:id/start", patch(drivers::start_ride))
        .route(
            "/api/driver/rides/:id/complete",
            patch(drivers::complete_ride),
        )
        .route("/api/driver/rides/:id/cancel", patch(drivers::cancel_ride))
        .layer(Extension(api))
        .layer(Extension(Arc::new(signer)));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
