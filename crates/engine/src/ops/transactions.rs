use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, Select, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    DateRange, EngineError, ResultEngine, Transaction, TransactionCmd, TransactionKind,
    transactions,
};

use super::{Engine, with_tx};

/// Filters for listing transactions.
#[derive(Clone, Debug, Default)]
pub struct TransactionListFilter {
    pub range: DateRange,
    pub kind: Option<TransactionKind>,
}

impl TransactionListFilter {
    pub fn range(range: DateRange) -> Self {
        Self { range, kind: None }
    }
}

pub(super) fn in_range(
    select: Select<transactions::Entity>,
    range: &DateRange,
) -> Select<transactions::Entity> {
    let select = match range.lower_instant() {
        Some(from) => select.filter(transactions::Column::OccurredAt.gte(from)),
        None => select,
    };
    match range.upper_instant() {
        Some(to) => select.filter(transactions::Column::OccurredAt.lt(to)),
        None => select,
    }
}

impl Engine {
    /// Persist a new transaction stamped with the current time.
    ///
    /// This only writes the row. Notification side effects are the caller's
    /// responsibility (see [`crate::TransactionHook`]) and must run after this
    /// returns.
    pub async fn create_transaction(
        &self,
        user_id: Uuid,
        cmd: TransactionCmd,
    ) -> ResultEngine<Transaction> {
        let tx = Transaction::new(user_id, cmd.kind, cmd.amount, cmd.description, Utc::now())?;

        self.require_user(&self.database, user_id).await?;
        transactions::ActiveModel::from(&tx)
            .insert(&self.database)
            .await?;
        tracing::debug!(transaction = %tx.id, user = %user_id, kind = tx.kind.as_str(), "transaction recorded");
        Ok(tx)
    }

    /// Persist several transactions at once: either all rows are written or
    /// none is. Every command is validated before touching the database.
    pub async fn create_transactions(
        &self,
        user_id: Uuid,
        cmds: Vec<TransactionCmd>,
    ) -> ResultEngine<Vec<Transaction>> {
        if cmds.is_empty() {
            return Err(EngineError::InvalidInput(
                "at least one transaction is required".to_string(),
            ));
        }
        let now = Utc::now();
        let txs = cmds
            .into_iter()
            .map(|cmd| Transaction::new(user_id, cmd.kind, cmd.amount, cmd.description, now))
            .collect::<ResultEngine<Vec<_>>>()?;

        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            for tx in &txs {
                transactions::ActiveModel::from(tx).insert(&db_tx).await?;
            }
            Ok(txs)
        })
    }

    pub async fn transaction(&self, user_id: Uuid, id: Uuid) -> ResultEngine<Transaction> {
        let model = self.require_transaction(&self.database, user_id, id).await?;
        Transaction::try_from(model)
    }

    /// List the transactions of a user in chronological order.
    pub async fn list_transactions(
        &self,
        user_id: Uuid,
        filter: &TransactionListFilter,
    ) -> ResultEngine<Vec<Transaction>> {
        self.require_user(&self.database, user_id).await?;

        let mut select = in_range(
            transactions::Entity::find()
                .filter(transactions::Column::UserId.eq(user_id.to_string())),
            &filter.range,
        );
        if let Some(kind) = filter.kind {
            select = select.filter(transactions::Column::Kind.eq(kind.as_str()));
        }

        select
            .order_by_asc(transactions::Column::OccurredAt)
            .order_by_asc(transactions::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    /// Replace kind, amount and description. The timestamp never changes and
    /// no notification is sent for updates.
    pub async fn update_transaction(
        &self,
        user_id: Uuid,
        id: Uuid,
        cmd: TransactionCmd,
    ) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            self.replace_transaction(&db_tx, user_id, id, cmd).await
        })
    }

    /// Replace several transactions at once: either all of them are updated
    /// or none is. An unknown id fails the whole batch.
    pub async fn update_transactions(
        &self,
        user_id: Uuid,
        updates: Vec<(Uuid, TransactionCmd)>,
    ) -> ResultEngine<Vec<Transaction>> {
        if updates.is_empty() {
            return Err(EngineError::InvalidInput(
                "at least one transaction is required".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let mut txs = Vec::with_capacity(updates.len());
            for (id, cmd) in updates {
                txs.push(self.replace_transaction(&db_tx, user_id, id, cmd).await?);
            }
            Ok(txs)
        })
    }

    pub async fn delete_transaction(&self, user_id: Uuid, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_transaction(&db_tx, user_id, id).await?;
            transactions::Entity::delete_by_id(id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Overwrite one row, keeping its `occurred_at`.
    async fn replace_transaction<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
        id: Uuid,
        cmd: TransactionCmd,
    ) -> ResultEngine<Transaction> {
        let model = self.require_transaction(db, user_id, id).await?;
        let tx = Transaction::new(
            user_id,
            cmd.kind,
            cmd.amount,
            cmd.description,
            model.occurred_at,
        )
        .map(|tx| Transaction { id, ..tx })?;
        transactions::ActiveModel::from(&tx).update(db).await?;
        Ok(tx)
    }

    async fn require_transaction<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
        id: Uuid,
    ) -> ResultEngine<transactions::Model> {
        self.require_user(db, user_id).await?;
        transactions::Entity::find_by_id(id.to_string())
            .filter(transactions::Column::UserId.eq(user_id.to_string()))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))
    }
}
