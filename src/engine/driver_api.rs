use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};

use crate::{
    api::DriverAPI,
    auth::{PendingProfile, Role, User},
    entities::Driver,
    error::{invalid_code_error, invalid_envelope_error, not_found_error, Error},
    verification,
};

#[async_trait]
impl DriverAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn register_driver_phone(&self, phone: String) -> Result<(), Error> {
        let code = self.codes.issue(&phone, verification::default_ttl());

        self.sms.send_code(&phone, &code).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self, code))]
    async fn verify_driver_phone(
        &self,
        phone: String,
        code: String,
    ) -> Result<(Driver, String), Error> {
        if !self.codes.validate(&phone, &code) {
            return Err(invalid_code_error());
        }

        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM drivers WHERE phone = $1").bind(&phone))
            .await?;

        let driver = match maybe_result {
            Some(result) => {
                let Json(driver) = result.try_get("data")?;
                driver
            }
            None => {
                let driver = Driver::with_phone(phone.clone());

                conn.execute(
                    sqlx::query(
                        "INSERT INTO drivers (id, phone, email, status, data) VALUES ($1, $2, $3, $4, $5)",
                    )
                    .bind(&driver.id)
                    .bind(&driver.phone)
                    .bind(&driver.email)
                    .bind(driver.status.name())
                    .bind(Json(&driver)),
                )
                .await?;

                tracing::info!(driver_id = %driver.id, "created driver from phone verification");

                driver
            }
        };

        let token = self.signer.issue_session(&User {
            id: driver.id,
            role: Role::Driver,
        })?;

        Ok((driver, token))
    }

    #[tracing::instrument(skip(self))]
    async fn request_driver_email_code(
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
    async fn verify_driver_email_code(
        &self,
        envelope: String,
        code: String,
    ) -> Result<(Driver, String), Error> {
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
            .fetch_optional(sqlx::query("SELECT data FROM drivers WHERE email = $1").bind(&email))
            .await?;

        let driver = match maybe_result {
            Some(result) => {
                let Json(mut driver): Json<Driver> = result.try_get("data")?;
                driver.complete_profile(first_name, last_name, email.clone());

                conn.execute(
                    sqlx::query(
                        "UPDATE drivers SET email = $2, status = $3, data = $4 WHERE id = $1",
                    )
                    .bind(&driver.id)
                    .bind(&driver.email)
                    .bind(driver.status.name())
                    .bind(Json(&driver)),
                )
                .await?;

                driver
            }
            None => {
                let driver = Driver::with_email(email.clone(), first_name, last_name);

                conn.execute(
                    sqlx::query(
                        "INSERT INTO drivers (id, phone, email, status, data) VALUES ($1, $2, $3, $4, $5)",
                    )
                    .bind(&driver.id)
                    .bind(&driver.phone)
                    .bind(&driver.email)
                    .bind(driver.status.name())
                    .bind(Json(&driver)),
                )
                .await?;

                tracing::info!(driver_id = %driver.id, "created driver from email verification");

                driver
            }
        };

        let token = self.signer.issue_session(&User {
            id: driver.id,
            role: Role::Driver,
        })?;

        Ok((driver, token))
    }

    #[tracing::instrument(skip(self))]
    async fn find_driver(&self, user: User) -> Result<Driver, Error> {
        self.authorize(&user, Role::Driver)?;

        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM drivers WHERE id = $1").bind(&user.id))
            .await?;

        let result = maybe_result.ok_or_else(|| not_found_error())?;
        let Json(driver) = result.try_get("data")?;

        Ok(driver)
    }
}
