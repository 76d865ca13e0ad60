//! Outbound delivery ports.
//!
//! The engine only knows these traits; concrete providers live in the
//! `notifier` crate.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("{0} channel is not configured")]
    NotConfigured(&'static str),
    #[error("provider rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
}

/// Port for sending emails.
#[async_trait]
pub trait EmailChannel: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ChannelError>;
}

/// Port for sending text messages.
#[async_trait]
pub trait SmsChannel: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> Result<(), ChannelError>;
}

/// Stand-in for a channel with no provider configured. Every send fails
/// with [`ChannelError::NotConfigured`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Disabled;

#[async_trait]
impl EmailChannel for Disabled {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), ChannelError> {
        Err(ChannelError::NotConfigured("email"))
    }
}

#[async_trait]
impl SmsChannel for Disabled {
    async fn send(&self, _to: &str, _body: &str) -> Result<(), ChannelError> {
        Err(ChannelError::NotConfigured("sms"))
    }
}
