use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope wrapping every JSON response, errors included.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<serde_json::Value> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Optional inclusive day range, `YYYY-MM-DD`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DateQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub username: String,
        pub email: String,
        #[serde(default)]
        pub first_name: String,
        #[serde(default)]
        pub last_name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub username: String,
        pub email: String,
        pub first_name: String,
        pub last_name: String,
    }
}

pub mod profile {
    use super::*;

    /// Fields left out keep their current value (or the default for a new
    /// profile).
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ProfileUpsert {
        pub phone_number: Option<String>,
        pub email_notifications: Option<bool>,
        pub sms_notifications: Option<bool>,
        pub low_balance_threshold_minor: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileView {
        pub user_id: Uuid,
        pub phone_number: String,
        pub email_notifications: bool,
        pub sms_notifications: bool,
        pub low_balance_threshold_minor: i64,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum TransactionKind {
        Deposit,
        Withdrawal,
        Transfer,
        Payment,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub kind: TransactionKind,
        /// Must be > 0.
        pub amount_minor: i64,
        #[serde(default)]
        pub description: String,
    }

    /// One entry of a bulk update.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub id: Uuid,
        pub kind: TransactionKind,
        pub amount_minor: i64,
        #[serde(default)]
        pub description: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub kind: TransactionKind,
        pub amount_minor: i64,
        /// Decimal rendering of `amount_minor`, e.g. `"12.34"`.
        pub amount: String,
        pub occurred_at: DateTime<Utc>,
        pub description: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionList {
        pub kind: Option<TransactionKind>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum ExportFormat {
        #[default]
        Csv,
        Pdf,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionExport {
        #[serde(default)]
        pub format: ExportFormat,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }
}

pub mod balance {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub balance_minor: i64,
        pub balance: String,
        pub deposits_minor: i64,
        pub withdrawals_minor: i64,
    }
}

pub mod statement {
    use super::*;
    use crate::transaction::TransactionView;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum StatementFormat {
        #[default]
        Json,
        Csv,
        Pdf,
    }

    /// Both dates are required; they are optional here so that a missing one
    /// is reported with a proper message instead of a rejected query string.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct StatementQuery {
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        #[serde(default)]
        pub format: StatementFormat,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatementView {
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub deposits_minor: i64,
        pub withdrawals_minor: i64,
        pub transactions: Vec<TransactionView>,
    }
}

pub mod investment {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvestmentNew {
        pub investment_type: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvestmentView {
        pub id: Uuid,
        pub investment_type: String,
        pub amount_minor: i64,
        pub occurred_at: DateTime<Utc>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub category: String,
        pub amount_minor: i64,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub category: String,
        pub amount_minor: i64,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryTotalView {
        pub category: String,
        pub total_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetAnalyticsView {
        pub total_budget_minor: i64,
        pub budget_by_category: Vec<CategoryTotalView>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub category: String,
        pub amount_minor: i64,
        pub date: NaiveDate,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub category: String,
        pub amount_minor: i64,
        pub date: NaiveDate,
        pub description: Option<String>,
    }
}

pub mod savings_goal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SavingsGoalNew {
        pub goal_name: String,
        pub target_amount_minor: i64,
        #[serde(default)]
        pub current_amount_minor: i64,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SavingsGoalView {
        pub id: Uuid,
        pub goal_name: String,
        pub target_amount_minor: i64,
        pub current_amount_minor: i64,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
    }
}

pub mod notification {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct NotificationView {
        pub id: Uuid,
        pub message: String,
        pub created_at: DateTime<Utc>,
        pub sent_via_email: bool,
        pub sent_via_sms: bool,
    }
}
