use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};

use crate::{
    api::RiderAPI,
    auth::{PendingProfile, Role, User},
    entities::Rider,
    error::{invalid_code_error, invalid_envelope_error, not_found_error, Error},
    verification,
};

#[async_trait]
impl RiderAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn register_rider_phone(&self, phone: String) -> Result<(), Error> {
        let code = self.codes.issue(&phone, verification::default_ttl());

        self.sms.send_code(&phone, &code).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self, code))]
    async fn verify_rider_phone(
        &self,
        phone: String,
        code: String,
    ) -> Result<(Rider, String), Error> {
        if !self.codes.validate(&phone, &code) {
            return Err(invalid_code_error());
        }

        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM riders WHERE phone = $1").bind(&phone))
            .await?;

        let rider = match maybe_result {
            Some(result) => {
                let Json(rider) = result.try_get("data")?;
                rider
            }
            None => {
                let rider = Rider::with_phone(phone.clone());

                conn.execute(
                    sqlx::query(
                        "INSERT INTO riders (id, phone, email, status, data) VALUES ($1, $2, $3, $4, $5)",
                    )
                    .bind(&rider.id)
                    .bind(&rider.phone)
                    .bind(&rider.email)
                    .bind(rider.status.name())
                    .bind(Json(&rider)),
                )
                .await?;

                tracing::info!(rider_id = %rider.id, "created rider from phone verification");

                rider
            }
        };

        let token = self.signer.issue_session(&User {
            id: rider.id,
            role: Role::Rider,
        })?;

        Ok((rider, token))
    }

    #[tracing::instrument(skip(self))]
    async fn request_rider_email_code(
        &self,
        email: String,
        first_name: String,
        last_name: String,
    ) -> Result<String, Error> {
        let code = self.codes.issue(&email, verification::default_ttl());

        let profile = PendingProfile::Email {
            email: email.clone(),
            first_name,
            last_name,
        };
        let envelope = self.signer.seal_envelope(profile, &code)?;

        self.mailer.send_code(&email, &code).await?;

        Ok(envelope)
    }

    #[tracing::instrument(skip(self, code))]
    async fn verify_rider_email_code(
        &self,
        envelope: String,
        code: String,
    ) -> Result<(Rider, String), Error> {
        let (profile, sealed_code) = self.signer.open_envelope(&envelope)?;

        let (email, first_name, last_name) = match profile {
            PendingProfile::Email {
                email,
                first_name,
                last_name,
            } => (email, first_name, last_name),
            PendingProfile::Phone { phone: _ } => return Err(invalid_envelope_error()),
        };

        if sealed_code != code || !self.codes.validate(&email, &code) {
            return Err(invalid_code_error());
        }

        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM riders WHERE email = $1").bind(&email))
            .await?;

        let rider = match maybe_result {
            Some(result) => {
                let Json(mut rider): Json<Rider> = result.try_get("data")?;
                rider.complete_profile(first_name, last_name, email.clone());

                conn.execute(
                    sqlx::query(
                        "UPDATE riders SET email = $2, status = $3, data = $4 WHERE id = $1",
                    )
                    .bind(&rider.id)
                    .bind(&rider.email)
                    .bind(rider.status.name())
                    .bind(Json(&rider)),
                )
                .await?;

                rider
            }
            None => {
                let rider = Rider::with_email(email.clone(), first_name, last_name);

                conn.execute(
                    sqlx::query(
                        "INSERT INTO riders (id, phone, email, status, data) VALUES ($1, $2, $3, $4, $5)",
                    )
                    .bind(&rider.id)
                    .bind(&rider.phone)
                    .bind(&rider.email)
                    .bind(rider.status.name())
                    .bind(Json(&rider)),
                )
                .await?;

                tracing::info!(rider_id = %rider.id, "created rider from email verification");

                rider
            }
        };

        let token = self.signer.issue_session(&User {
            id: rider.id,
            role: Role::Rider,
        })?;

        Ok((rider, token))
    }

    #[tracing::instrument(skip(self))]
    async fn find_rider(&self, user: User) -> Result<Rider, Error> {
        self.authorize(&user, Role::Rider)?;

        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM riders WHERE id = $1").bind(&user.id))
            .await?;

        let result = maybe_result.ok_or_else(|| not_found_error())?;
        let Json(rider) = result.try_get("data")?;

        Ok(rider)
    }
}
