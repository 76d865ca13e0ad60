use sea_orm::{QueryFilter, QuerySelect, prelude::*, sea_query::Expr};
use uuid::Uuid;

use crate::{Money, ResultEngine, TransactionKind, transactions};

use super::Engine;

/// Deposit and withdrawal totals of a user.
///
/// Only `DEPOSIT` and `WITHDRAWAL` rows count: transfers and payments are
/// left out of the balance on purpose, matching how balances have always
/// been reported to users.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Balance {
    pub deposits: Money,
    pub withdrawals: Money,
}

impl Balance {
    /// `deposits - withdrawals`.
    pub fn total(&self) -> Money {
        self.deposits - self.withdrawals
    }
}

impl Engine {
    /// Compute the balance of a user from the full transaction history.
    ///
    /// The sums are delegated to the database and nothing is cached: every
    /// call reads the current state of the ledger.
    pub async fn balance(&self, user_id: Uuid) -> ResultEngine<Balance> {
        self.require_user(&self.database, user_id).await?;

        let totals: Vec<(String, Option<i64>)> = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::Kind)
            .column_as(Expr::col(transactions::Column::AmountMinor).sum(), "total")
            .filter(transactions::Column::UserId.eq(user_id.to_string()))
            .filter(transactions::Column::Kind.is_in([
                TransactionKind::Deposit.as_str(),
                TransactionKind::Withdrawal.as_str(),
            ]))
            .group_by(transactions::Column::Kind)
            .into_tuple()
            .all(&self.database)
            .await?;

        let mut balance = Balance::default();
        for (kind, total) in totals {
            let total = Money::new(total.unwrap_or_default());
            match TransactionKind::try_from(kind.as_str())? {
                TransactionKind::Deposit => balance.deposits = total,
                TransactionKind::Withdrawal => balance.withdrawals = total,
                TransactionKind::Transfer | TransactionKind::Payment => {}
            }
        }
        Ok(balance)
    }
}
