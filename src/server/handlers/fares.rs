use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::auth::User;
use crate::entities::{Coordinates, PricingFactors};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    pickup: Coordinates,
    destination: Coordinates,
    surge_multiplier: f64,
    #[serde(flatten)]
    factors: PricingFactors,
}

#[derive(Serialize)]
pub struct QuoteResponse {
    success: bool,
    price: String,
}

pub async fn quote(
    Extension(api): Extension<DynAPI>,
    user: User,
    Json(params): Json<QuoteParams>,
) -> Result<Json<QuoteResponse>, Error> {
    let quote = api
        .quote_fare(
            user,
            params.pickup,
            params.destination,
            params.surge_multiplier,
            params.factors,
        )
        .await?;

    Ok(Json(QuoteResponse {
        success: true,
        price: quote.price_string(),
    }))
}
