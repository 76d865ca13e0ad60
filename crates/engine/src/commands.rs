//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists. Each command is used both to
//! create a record and to replace an existing one.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::{Money, ResultEngine, TransactionKind, util::ensure_date_order};

/// Create or replace a user.
#[derive(Clone, Debug)]
pub struct UserCmd {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserCmd {
    #[must_use]
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    #[must_use]
    pub fn name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }
}

/// Create or replace the notification profile of a user.
///
/// Fields left to `None` fall back to the current value, or to the default
/// when the profile does not exist yet.
#[derive(Clone, Debug, Default)]
pub struct ProfileCmd {
    pub phone_number: Option<String>,
    pub email_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
    pub low_balance_threshold: Option<Money>,
}

impl ProfileCmd {
    #[must_use]
    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    #[must_use]
    pub fn email_notifications(mut self, enabled: bool) -> Self {
        self.email_notifications = Some(enabled);
        self
    }

    #[must_use]
    pub fn sms_notifications(mut self, enabled: bool) -> Self {
        self.sms_notifications = Some(enabled);
        self
    }

    #[must_use]
    pub fn low_balance_threshold(mut self, threshold: Money) -> Self {
        self.low_balance_threshold = Some(threshold);
        self
    }
}

/// Create or replace a transaction. The timestamp is not part of the command:
/// it is stamped on creation and kept on replace.
#[derive(Clone, Debug)]
pub struct TransactionCmd {
    pub kind: TransactionKind,
    pub amount: Money,
    pub description: String,
}

impl TransactionCmd {
    #[must_use]
    pub fn new(kind: TransactionKind, amount: Money) -> Self {
        Self {
            kind,
            amount,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Clone, Debug)]
pub struct InvestmentCmd {
    pub investment_type: String,
    pub amount: Money,
}

#[derive(Clone, Debug)]
pub struct BudgetCmd {
    pub category: String,
    pub amount: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub category: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SavingsGoalCmd {
    pub goal_name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Optional, inclusive day range used by listing and export operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Builds a range, rejecting `start > end` when both are given.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ResultEngine<Self> {
        if let (Some(start), Some(end)) = (start, end) {
            ensure_date_order(start, end)?;
        }
        Ok(Self { start, end })
    }

    /// The unbounded range.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Inclusive lower bound as a UTC instant (midnight of `start`).
    pub(crate) fn lower_instant(&self) -> Option<DateTime<Utc>> {
        self.start
            .map(|day| day.and_time(NaiveTime::MIN).and_utc())
    }

    /// Exclusive upper bound as a UTC instant (midnight after `end`).
    pub(crate) fn upper_instant(&self) -> Option<DateTime<Utc>> {
        self.end
            .and_then(|day| day.checked_add_days(Days::new(1)))
            .map(|day| day.and_time(NaiveTime::MIN).and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_bound_covers_whole_day() {
        let range = DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 31))).unwrap();
        assert_eq!(
            range.lower_instant().unwrap().to_rfc3339(),
            "2024-01-01T00:00:00+00:00"
        );
        assert_eq!(
            range.upper_instant().unwrap().to_rfc3339(),
            "2024-02-01T00:00:00+00:00"
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(DateRange::new(Some(date(2024, 2, 1)), Some(date(2024, 1, 1))).is_err());
        assert!(DateRange::new(Some(date(2024, 2, 1)), None).is_ok());
    }
}
