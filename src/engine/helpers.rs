use super::Database;

use sqlx::{types::Json, Executor, Row, Transaction};
use uuid::Uuid;

use crate::{
    entities::Ride,
    error::{not_found_error, Error},
};

#[tracing::instrument(skip(tx))]
pub async fn fetch_ride_for_update(
    tx: &mut Transaction<'_, Database>,
    id: &Uuid,
) -> Result<Ride, Error> {
    let Json(ride): Json<Ride> = tx
        .fetch_optional(sqlx::query("SELECT data FROM rides WHERE id = $1 FOR UPDATE").bind(id))
        .await?
        .ok_or_else(|| not_found_error())?
        .try_get("data")?;

    Ok(ride)
}

#[tracing::instrument(skip(tx))]
pub async fn update_ride(tx: &mut Transaction<'_, Database>, ride: &Ride) -> Result<(), Error> {
    tx.execute(
        sqlx::query("UPDATE rides SET driver_id = $2, status = $3, data = $4 WHERE id = $1")
            .bind(&ride.id)
            .bind(&ride.driver_id)
            .bind(ride.status.name())
            .bind(Json(ride)),
    )
    .await?;

    Ok(())
}
