use reqwest::Client;

use crate::config::SmsConfig;
use crate::error::{invalid_input_error, upstream_error, Error};

/// Twilio-shaped SMS gateway client. The message body is the only thing
/// this backend controls; delivery itself is the gateway's problem.
#[derive(Clone)]
pub struct SmsClient {
    client: Client,
    config: SmsConfig,
}

impl SmsClient {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[tracing::instrument(skip(self, code))]
    pub async fn send_code(&self, phone: &str, code: &str) -> Result<(), Error> {
        let url = format!(
            "https://{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base, self.config.account_sid
        );

        let body = format!(
            "Your verification code is {}. It expires in 5 minutes.",
            code
        );
        let params = [
            ("To", phone),
            ("From", self.config.from_number.as_str()),
            ("Body", body.as_str()),
        ];

        let res = self
            .client
            .post(url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code >= 400 && status_code < 500 {
            tracing::warn!(%phone, status_code, "SMS gateway rejected the message");
            return Err(invalid_input_error());
        } else if !res.status().is_success() {
            return Err(upstream_error());
        }

        tracing::info!(%phone, "verification SMS dispatched");

        Ok(())
    }
}
