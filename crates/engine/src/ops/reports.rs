use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    Chart, ChartKind, DateRange, EngineError, Money, ResultEngine, Statement, Transaction,
    TransactionListFilter,
};

use super::Engine;

impl Engine {
    /// Account statement between two days, both included.
    pub async fn statement(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ResultEngine<Statement> {
        let range = DateRange::new(Some(start), Some(end))?;
        let transactions = self
            .list_transactions(user_id, &TransactionListFilter::range(range))
            .await?;
        Ok(Statement {
            start,
            end,
            transactions,
        })
    }

    /// Transactions to export for a range. An empty result is an error:
    /// there is nothing to put in the file.
    pub async fn export_transactions(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> ResultEngine<Vec<Transaction>> {
        let transactions = self
            .list_transactions(user_id, &TransactionListFilter::range(range))
            .await?;
        if transactions.is_empty() {
            return Err(EngineError::KeyNotFound(
                "no transactions found for the specified date range".to_string(),
            ));
        }
        Ok(transactions)
    }

    /// Bar and line chart of transaction amounts per day.
    pub async fn transaction_charts(&self, user_id: Uuid) -> ResultEngine<[Chart; 2]> {
        let transactions = self
            .list_transactions(user_id, &TransactionListFilter::default())
            .await?;
        let points: Vec<_> = transactions
            .iter()
            .map(|tx| (tx.occurred_at.date_naive(), tx.amount))
            .collect();
        over_time("Transactions Over Time", &points)
    }

    /// Bar and line chart of invested amounts per day.
    pub async fn investment_charts(&self, user_id: Uuid) -> ResultEngine<[Chart; 2]> {
        let investments = self.list_investments(user_id, &DateRange::all()).await?;
        let points: Vec<_> = investments
            .iter()
            .map(|investment| (investment.occurred_at.date_naive(), investment.amount))
            .collect();
        over_time("Investments Over Time", &points)
    }
}

fn over_time(title: &str, points: &[(NaiveDate, Money)]) -> ResultEngine<[Chart; 2]> {
    let bar = Chart::amounts_over_time(ChartKind::Bar, title, points.iter().copied())?;
    let line = Chart::amounts_over_time(ChartKind::Line, title, points.iter().copied())?;
    Ok([bar, line])
}
