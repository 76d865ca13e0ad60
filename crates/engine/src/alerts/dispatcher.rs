use std::sync::Arc;

use super::{EmailChannel, Message, Recipient, SmsChannel};

/// Outcome of one channel for one dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// The channel was not used (no profile, preference off, no address).
    Skipped,
    Sent,
    /// The provider call failed; the error was logged.
    Failed(String),
}

impl Delivery {
    pub fn attempted(&self) -> bool {
        !matches!(self, Self::Skipped)
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// What happened on each channel for a single dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchReport {
    pub email: Delivery,
    pub sms: Delivery,
}

impl DispatchReport {
    pub fn skipped() -> Self {
        Self {
            email: Delivery::Skipped,
            sms: Delivery::Skipped,
        }
    }

    /// Returns `true` if at least one provider was called.
    pub fn attempted(&self) -> bool {
        self.email.attempted() || self.sms.attempted()
    }
}

/// Delivers a message through the channels a recipient opted into.
///
/// Each call is synchronous and at-most-once: no retry, no queue. Channel
/// failures are logged and reported, never returned as errors.
#[derive(Clone)]
pub struct Dispatcher {
    email: Arc<dyn EmailChannel>,
    sms: Arc<dyn SmsChannel>,
}

impl Dispatcher {
    pub fn new(email: Arc<dyn EmailChannel>, sms: Arc<dyn SmsChannel>) -> Self {
        Self { email, sms }
    }

    pub async fn dispatch(&self, recipient: &Recipient, message: &Message) -> DispatchReport {
        let Some(profile) = recipient.profile.as_ref() else {
            tracing::debug!(user = %recipient.user_id, "no profile, notification skipped");
            return DispatchReport::skipped();
        };

        let address = recipient.email.trim();
        let email = if profile.email_notifications && !address.is_empty() {
            match self
                .email
                .send(address, &message.subject, &message.body)
                .await
            {
                Ok(()) => Delivery::Sent,
                Err(err) => {
                    tracing::warn!(user = %recipient.user_id, "email delivery failed: {err}");
                    Delivery::Failed(err.to_string())
                }
            }
        } else {
            Delivery::Skipped
        };

        let sms = match profile.sms_target() {
            Some(phone) => match self.sms.send(phone, &message.body).await {
                Ok(()) => Delivery::Sent,
                Err(err) => {
                    tracing::warn!(user = %recipient.user_id, "sms delivery failed: {err}");
                    Delivery::Failed(err.to_string())
                }
            },
            None => Delivery::Skipped,
        };

        tracing::debug!(user = %recipient.user_id, ?email, ?sms, "notification dispatched");
        DispatchReport { email, sms }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::{ChannelError, Profile};

    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl Recording {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, to: &str, body: &str) -> Result<(), ChannelError> {
            self.calls
                .lock()
                .unwrap()
                .push((to.to_string(), body.to_string()));
            if self.fail {
                return Err(ChannelError::Transport("connection refused".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl EmailChannel for Recording {
        async fn send(&self, to: &str, _subject: &str, body: &str) -> Result<(), ChannelError> {
            self.record(to, body)
        }
    }

    #[async_trait]
    impl SmsChannel for Recording {
        async fn send(&self, to: &str, body: &str) -> Result<(), ChannelError> {
            self.record(to, body)
        }
    }

    fn setup(email: Recording, sms: Recording) -> (Dispatcher, Arc<Recording>, Arc<Recording>) {
        let email = Arc::new(email);
        let sms = Arc::new(sms);
        (Dispatcher::new(email.clone(), sms.clone()), email, sms)
    }

    fn recipient(profile: Option<Profile>) -> Recipient {
        Recipient {
            user_id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            profile,
        }
    }

    fn message() -> Message {
        Message::new("subject", "body")
    }

    #[tokio::test]
    async fn no_profile_makes_no_calls() {
        let (dispatcher, email, sms) = setup(Recording::default(), Recording::default());

        let report = dispatcher.dispatch(&recipient(None), &message()).await;

        assert_eq!(report, DispatchReport::skipped());
        assert!(email.calls().is_empty());
        assert!(sms.calls().is_empty());
    }

    #[tokio::test]
    async fn all_preferences_off_makes_no_calls() {
        let (dispatcher, email, sms) = setup(Recording::default(), Recording::default());
        let mut profile = Profile::new(Uuid::new_v4());
        profile.email_notifications = false;
        profile.sms_notifications = false;
        profile.phone_number = "+15550100".to_string();

        let report = dispatcher
            .dispatch(&recipient(Some(profile)), &message())
            .await;

        assert!(!report.attempted());
        assert!(email.calls().is_empty());
        assert!(sms.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_phone_suppresses_sms_but_not_email() {
        let (dispatcher, email, sms) = setup(Recording::default(), Recording::default());
        let mut profile = Profile::new(Uuid::new_v4());
        profile.sms_notifications = true;

        let report = dispatcher
            .dispatch(&recipient(Some(profile)), &message())
            .await;

        assert_eq!(report.email, Delivery::Sent);
        assert_eq!(report.sms, Delivery::Skipped);
        assert_eq!(
            email.calls(),
            vec![("alice@example.com".to_string(), "body".to_string())]
        );
        assert!(sms.calls().is_empty());
    }

    #[tokio::test]
    async fn both_channels_when_enabled() {
        let (dispatcher, email, sms) = setup(Recording::default(), Recording::default());
        let mut profile = Profile::new(Uuid::new_v4());
        profile.sms_notifications = true;
        profile.phone_number = " +15550100 ".to_string();

        let report = dispatcher
            .dispatch(&recipient(Some(profile)), &message())
            .await;

        assert_eq!(report.email, Delivery::Sent);
        assert_eq!(report.sms, Delivery::Sent);
        assert_eq!(email.calls().len(), 1);
        assert_eq!(
            sms.calls(),
            vec![("+15550100".to_string(), "body".to_string())]
        );
    }

    #[tokio::test]
    async fn email_failure_is_reported_and_sms_still_sent() {
        let (dispatcher, email, sms) = setup(Recording::failing(), Recording::default());
        let mut profile = Profile::new(Uuid::new_v4());
        profile.sms_notifications = true;
        profile.phone_number = "+15550100".to_string();

        let report = dispatcher
            .dispatch(&recipient(Some(profile)), &message())
            .await;

        assert_eq!(
            report.email,
            Delivery::Failed("transport error: connection refused".to_string())
        );
        assert_eq!(report.sms, Delivery::Sent);
        assert_eq!(email.calls().len(), 1);
        assert_eq!(sms.calls().len(), 1);
    }
}
