use async_trait::async_trait;
use engine::{ChannelError, SmsChannel};
use reqwest::{Client, Request};
use serde::Deserialize;

use crate::{check, transport};

fn default_api_base() -> String {
    "https://api.twilio.com".to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number, E.164.
    pub from_number: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

/// Text message channel backed by the Twilio REST API.
#[derive(Clone, Debug)]
pub struct TwilioSms {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSms {
    pub fn new(client: Client, config: TwilioConfig) -> Self {
        Self { client, config }
    }

    fn url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    fn request(&self, to: &str, body: &str) -> Result<Request, reqwest::Error> {
        self.client
            .post(self.url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", to),
                ("From", self.config.from_number.as_str()),
                ("Body", body),
            ])
            .build()
    }
}

#[async_trait]
impl SmsChannel for TwilioSms {
    async fn send(&self, to: &str, body: &str) -> Result<(), ChannelError> {
        let request = self.request(to, body).map_err(transport)?;
        let response = self.client.execute(request).await.map_err(transport)?;
        check(response).await?;
        tracing::debug!(to, "text message accepted by provider");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_base: &str) -> TwilioConfig {
        TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: "token".to_string(),
            from_number: "+15550000".to_string(),
            api_base: api_base.to_string(),
        }
    }

    #[test]
    fn url_uses_account_sid() {
        let sms = TwilioSms::new(Client::new(), config("https://api.twilio.com/"));
        assert_eq!(
            sms.url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn request_is_a_form_with_basic_auth() {
        let sms = TwilioSms::new(Client::new(), config("http://localhost:8080"));
        let request = sms.request("+15550100", "Low balance & more").unwrap();

        assert_eq!(
            request.headers()["content-type"],
            "application/x-www-form-urlencoded"
        );
        // base64("AC123:token")
        assert_eq!(request.headers()["authorization"], "Basic QUMxMjM6dG9rZW4=");
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(
            std::str::from_utf8(body).unwrap(),
            "To=%2B15550100&From=%2B15550000&Body=Low+balance+%26+more"
        );
    }

    #[test]
    fn api_base_defaults_to_twilio() {
        let config: TwilioConfig = serde_json::from_value(serde_json::json!({
            "account_sid": "AC123",
            "auth_token": "token",
            "from_number": "+15550000",
        }))
        .unwrap();
        assert_eq!(config.api_base, "https://api.twilio.com");
    }
}
