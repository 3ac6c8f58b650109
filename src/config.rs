use std::env;
use std::net::SocketAddr;

use crate::error::{invalid_state_error, Error};

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub token_secret: String,
    pub sms: SmsConfig,
    pub mail: MailConfig,
}

#[derive(Clone, Debug)]
pub struct SmsConfig {
    pub api_base: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub api_base: String,
    pub api_key: String,
    pub from_address: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value.parse().map_err(|_| invalid_state_error())?,
            Err(_) => 5,
        };

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".into())
            .parse()
            .map_err(|_| invalid_state_error())?;

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            max_connections,
            bind_addr,
            token_secret: env::var("TOKEN_SECRET")?,
            sms: SmsConfig {
                api_base: env::var("SMS_API_BASE")?,
                account_sid: env::var("SMS_ACCOUNT_SID")?,
                auth_token: env::var("SMS_AUTH_TOKEN")?,
                from_number: env::var("SMS_FROM_NUMBER")?,
            },
            mail: MailConfig {
                api_base: env::var("MAIL_API_BASE")?,
                api_key: env::var("MAIL_API_KEY")?,
                from_address: env::var("MAIL_FROM_ADDRESS")?,
            },
        })
    }
}
