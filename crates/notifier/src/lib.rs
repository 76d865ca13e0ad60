//! HTTP adapters for the alert channels of the engine.
//!
//! - [`HttpMailer`] posts JSON to a transactional mail API.
//! - [`TwilioSms`] posts a form to the Twilio messages endpoint.

use std::time::Duration;

use engine::ChannelError;

pub use mailer::{HttpMailer, MailerConfig};
pub use reqwest::Client;
pub use sms::{TwilioConfig, TwilioSms};

mod mailer;
mod sms;

/// Default limit for a single provider call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client shared by the channels. A provider that does not
/// answer within `timeout` fails the delivery with a transport error.
pub fn client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

/// Longest provider error body kept in a [`ChannelError`].
const MAX_ERROR_BODY: usize = 200;

fn transport(err: reqwest::Error) -> ChannelError {
    ChannelError::Transport(err.to_string())
}

/// Turn a provider response into a channel result.
async fn check(response: reqwest::Response) -> Result<(), ChannelError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let mut message = response.text().await.unwrap_or_default();
    if message.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        message.truncate(end);
    }
    Err(ChannelError::Rejected {
        status: status.as_u16(),
        message,
    })
}
