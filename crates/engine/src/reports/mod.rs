//! Read-only views over the ledger: statements, exports and charts.

use chrono::NaiveDate;

use crate::{Money, Transaction, TransactionKind};

mod charts;
mod export;

pub use charts::{Chart, ChartKind, ChartPoint};
pub use export::{render_csv, render_pdf};

/// Transactions of a user between two days, both included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub transactions: Vec<Transaction>,
}

impl Statement {
    /// Sum of the deposits in the statement.
    pub fn deposits(&self) -> Money {
        self.sum_of(TransactionKind::Deposit)
    }

    /// Sum of the withdrawals in the statement.
    pub fn withdrawals(&self) -> Money {
        self.sum_of(TransactionKind::Withdrawal)
    }

    fn sum_of(&self, kind: TransactionKind) -> Money {
        self.transactions
            .iter()
            .filter(|tx| tx.kind == kind)
            .map(|tx| tx.amount)
            .sum()
    }

    /// Heading line used by the exports.
    pub fn period(&self) -> String {
        format!("From {} to {}", self.start, self.end)
    }
}

const ADVICE: [(&str, &str); 4] = [
    (
        "save_more",
        "Consider setting aside 20% of your income each month to increase your savings.",
    ),
    (
        "reduce_expenses",
        "Review your monthly subscriptions and cancel any that are not necessary.",
    ),
    (
        "invest_wisely",
        "Diversify your investments to reduce risk and improve returns.",
    ),
    (
        "budgeting",
        "Create a monthly budget and stick to it to manage your finances effectively.",
    ),
];

/// Generic financial tips, the same for every user.
pub fn financial_advice() -> Vec<(&'static str, &'static str)> {
    ADVICE.to_vec()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn statement_totals_ignore_transfers_and_payments() {
        let user_id = Uuid::new_v4();
        let tx = |kind, cents| {
            Transaction::new(user_id, kind, Money::new(cents), String::new(), Utc::now()).unwrap()
        };
        let statement = Statement {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            transactions: vec![
                tx(TransactionKind::Deposit, 20000),
                tx(TransactionKind::Deposit, 500),
                tx(TransactionKind::Withdrawal, 8000),
                tx(TransactionKind::Transfer, 1000),
                tx(TransactionKind::Payment, 1000),
            ],
        };

        assert_eq!(statement.deposits(), Money::new(20500));
        assert_eq!(statement.withdrawals(), Money::new(8000));
        assert_eq!(statement.period(), "From 2024-01-01 to 2024-01-31");
    }

    #[test]
    fn advice_has_the_four_topics() {
        let keys: Vec<_> = financial_advice().into_iter().map(|(key, _)| key).collect();
        assert_eq!(
            keys,
            ["save_more", "reduce_expenses", "invest_wisely", "budgeting"]
        );
    }
}
