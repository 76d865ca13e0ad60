use async_trait::async_trait;
use engine::{ChannelError, EmailChannel};
use reqwest::{Client, Request};
use serde::{Deserialize, Serialize};

use crate::{check, transport};

#[derive(Clone, Debug, Deserialize)]
pub struct MailerConfig {
    /// Full URL of the send endpoint.
    pub endpoint: String,
    pub api_key: String,
    /// Sender address.
    pub from: String,
}

#[derive(Serialize)]
struct Payload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Email channel backed by a JSON mail API with bearer authentication.
#[derive(Clone, Debug)]
pub struct HttpMailer {
    client: Client,
    config: MailerConfig,
}

impl HttpMailer {
    pub fn new(client: Client, config: MailerConfig) -> Self {
        Self { client, config }
    }

    fn request(&self, to: &str, subject: &str, body: &str) -> Result<Request, reqwest::Error> {
        self.client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&Payload {
                from: &self.config.from,
                to,
                subject,
                text: body,
            })
            .build()
    }
}

#[async_trait]
impl EmailChannel for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ChannelError> {
        let request = self.request(to, subject, body).map_err(transport)?;
        let response = self.client.execute(request).await.map_err(transport)?;
        check(response).await?;
        tracing::debug!(to, "email accepted by provider");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn mailer() -> HttpMailer {
        HttpMailer::new(
            Client::new(),
            MailerConfig {
                endpoint: "https://mail.example.com/v1/send".to_string(),
                api_key: "secret".to_string(),
                from: "alerts@example.com".to_string(),
            },
        )
    }

    #[test]
    fn request_is_json_with_bearer_token() {
        let request = mailer()
            .request("alice@example.com", "Low Balance Alert", "body")
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().as_str(), "https://mail.example.com/v1/send");
        assert_eq!(request.headers()["authorization"], "Bearer secret");
        assert_eq!(request.headers()["content-type"], "application/json");

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let body: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(
            body,
            json!({
                "from": "alerts@example.com",
                "to": "alice@example.com",
                "subject": "Low Balance Alert",
                "text": "body",
            })
        );
    }
}
