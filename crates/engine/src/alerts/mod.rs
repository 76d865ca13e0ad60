//! Transaction alerts.
//!
//! After a transaction is persisted the caller runs the
//! [`TransactionHook`], which:
//!
//! 1. tells the owner about the new transaction,
//! 2. recomputes the owner's balance,
//! 3. sends a low-balance alert when the balance is strictly below the
//!    threshold saved in the owner's [`Profile`].
//!
//! Delivery goes through the [`Dispatcher`], which honours the channel
//! preferences of the profile. A failing channel never fails the caller:
//! the transaction is already stored when the hook runs.

use uuid::Uuid;

use crate::{Money, Profile, Transaction};

mod balance;
mod channels;
mod dispatcher;
mod hook;

pub use balance::BalanceCheck;
pub use channels::{ChannelError, Disabled, EmailChannel, SmsChannel};
pub use dispatcher::{Delivery, DispatchReport, Dispatcher};
pub use hook::{HookReport, TransactionHook};

/// Who a notification is for: the contact address plus the optional
/// profile holding the channel preferences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipient {
    pub user_id: Uuid,
    pub email: String,
    pub profile: Option<Profile>,
}

/// A notification: the subject is only used by the email channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

impl Message {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Notice sent for every newly created transaction.
    pub fn transaction_created(tx: &Transaction) -> Self {
        let label = tx.kind.label();
        Self::new(
            format!("New {label} Transaction"),
            format!(
                "A {} of {} was made on your account.",
                label.to_lowercase(),
                tx.amount
            ),
        )
    }

    /// Alert sent when the balance drops under the profile threshold.
    pub fn low_balance(threshold: Money, balance: Money) -> Self {
        Self::new(
            "Low Balance Alert",
            format!(
                "Your account balance is below your set threshold of {threshold}. Current balance: {balance}."
            ),
        )
    }
}
