use reqwest::Client;
use serde_json::json;

use crate::config::MailConfig;
use crate::error::{invalid_input_error, upstream_error, Error};

/// HTTP transactional-mail client used for email verification codes.
#[derive(Clone)]
pub struct MailClient {
    client: Client,
    config: MailConfig,
}

impl MailClient {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[tracing::instrument(skip(self, code))]
    pub async fn send_code(&self, email: &str, code: &str) -> Result<(), Error> {
        let url = format!("https://{}/v1/send", self.config.api_base);

        let message = json!({
            "from": self.config.from_address,
            "to": email,
            "subject": "Your verification code",
            "text": format!(
                "Your verification code is {}. It expires in 5 minutes.",
                code
            ),
        });

        let res = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&message)
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code >= 400 && status_code < 500 {
            tracing::warn!(%email, status_code, "mail API rejected the message");
            return Err(invalid_input_error());
        } else if !res.status().is_success() {
            return Err(upstream_error());
        }

        tracing::info!(%email, "verification email dispatched");

        Ok(())
    }
}
