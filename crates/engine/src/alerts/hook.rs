use chrono::Utc;
use uuid::Uuid;

use crate::{Engine, Notification, ResultEngine, Transaction};

use super::{BalanceCheck, DispatchReport, Dispatcher, Message, Recipient};

/// Result of running the hook for one transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookReport {
    pub transaction_notice: DispatchReport,
    /// `None` when the owner has no profile.
    pub balance: Option<BalanceCheck>,
    /// Set only when the balance was below the threshold.
    pub low_balance_alert: Option<DispatchReport>,
}

impl HookReport {
    /// Number of messages that reached at least one provider.
    pub fn dispatches(&self) -> usize {
        [Some(&self.transaction_notice), self.low_balance_alert.as_ref()]
            .into_iter()
            .flatten()
            .filter(|report| report.attempted())
            .count()
    }
}

/// Side effects of a newly created transaction.
///
/// Must run after the transaction row is committed so the recomputed
/// balance includes it. Updates and deletes never go through the hook.
#[derive(Clone)]
pub struct TransactionHook {
    dispatcher: Dispatcher,
}

impl TransactionHook {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Notify the owner of `tx`, then check the balance and send a low
    /// balance alert if needed.
    ///
    /// Only database failures are returned. Channel failures are logged and
    /// visible in the report.
    pub async fn after_create(&self, engine: &Engine, tx: &Transaction) -> ResultEngine<HookReport> {
        let recipient = engine.recipient(tx.user_id).await?;

        let notice = Message::transaction_created(tx);
        let transaction_notice = self.deliver(engine, &recipient, &notice).await;

        let balance = engine
            .evaluate_balance(tx.user_id, recipient.profile.as_ref())
            .await?;

        let low_balance_alert = match balance {
            Some(check) if check.is_low() => {
                tracing::info!(
                    user = %tx.user_id,
                    balance = %check.balance,
                    threshold = %check.threshold,
                    "balance below threshold"
                );
                let alert = Message::low_balance(check.threshold, check.balance);
                Some(self.deliver(engine, &recipient, &alert).await)
            }
            _ => None,
        };

        Ok(HookReport {
            transaction_notice,
            balance,
            low_balance_alert,
        })
    }

    async fn deliver(
        &self,
        engine: &Engine,
        recipient: &Recipient,
        message: &Message,
    ) -> DispatchReport {
        let report = self.dispatcher.dispatch(recipient, message).await;
        if report.attempted() {
            let notification = Notification {
                id: Uuid::new_v4(),
                user_id: recipient.user_id,
                message: message.body.clone(),
                created_at: Utc::now(),
                sent_via_email: report.email.is_sent(),
                sent_via_sms: report.sms.is_sent(),
            };
            if let Err(err) = engine.record_notification(&notification).await {
                tracing::warn!(user = %recipient.user_id, "cannot record notification: {err}");
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Delivery;

    fn report(email: Delivery, sms: Delivery) -> DispatchReport {
        DispatchReport { email, sms }
    }

    #[test]
    fn dispatches_count_only_attempted_messages() {
        let silent = HookReport {
            transaction_notice: DispatchReport::skipped(),
            balance: None,
            low_balance_alert: None,
        };
        assert_eq!(silent.dispatches(), 0);

        let both = HookReport {
            transaction_notice: report(Delivery::Sent, Delivery::Skipped),
            balance: None,
            low_balance_alert: Some(report(
                Delivery::Failed("boom".to_string()),
                Delivery::Skipped,
            )),
        };
        assert_eq!(both.dispatches(), 2);
    }
}
