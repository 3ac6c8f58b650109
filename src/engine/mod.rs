mod driver_api;
mod fare_api;
mod helpers;
mod ride_api;
mod rider_api;

use sqlx::{Executor, Pool, Postgres};

use crate::{
    api::API,
    auth::{Role, Signer, User},
    config::Config,
    error::{unauthorized_error, Error},
    external::{MailClient, SmsClient},
    verification::CodeStore,
};

type Database = Postgres;

pub struct Engine {
    pool: Pool<Database>,
    codes: CodeStore,
    signer: Signer,
    sms: SmsClient,
    mailer: MailClient,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(pool: Pool<Database>, signer: Signer, config: &Config) -> Result<Self, Error> {
        // rider service
        pool.execute(
            "CREATE TABLE IF NOT EXISTS riders (id UUID PRIMARY KEY, phone VARCHAR UNIQUE, email VARCHAR UNIQUE, status VARCHAR NOT NULL, data JSONB NOT NULL)",
        )
        .await?;

        // driver service
        pool.execute(
            "CREATE TABLE IF NOT EXISTS drivers (id UUID PRIMARY KEY, phone VARCHAR UNIQUE, email VARCHAR UNIQUE, status VARCHAR NOT NULL, data JSONB NOT NULL)",
        )
        .await?;

        // ride service
        pool.execute(
            "CREATE TABLE IF NOT EXISTS rides (id UUID PRIMARY KEY, rider_id UUID NOT NULL, driver_id UUID, status VARCHAR NOT NULL, data JSONB NOT NULL)",
        )
        .await?;

        Ok(Self {
            pool,
            codes: CodeStore::new(),
            signer,
            sms: SmsClient::new(config.sms.clone()),
            mailer: MailClient::new(config.mail.clone()),
        })
    }
}

impl Engine {
    fn authorize(&self, user: &User, role: Role) -> Result<(), Error> {
        if user.role == role {
            return Ok(());
        }

        Err(unauthorized_error())
    }
}

impl API for Engine {}
