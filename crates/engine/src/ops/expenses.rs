use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    DateRange, EngineError, Expense, ExpenseCmd, ResultEngine, expenses,
    util::normalize_optional_text,
};

use super::{Engine, with_tx};

impl Engine {
    pub async fn create_expense(&self, user_id: Uuid, cmd: ExpenseCmd) -> ResultEngine<Expense> {
        let expense = Expense::new(
            user_id,
            &cmd.category,
            cmd.amount,
            cmd.date,
            normalize_optional_text(cmd.description.as_deref()),
        )?;
        self.require_user(&self.database, user_id).await?;
        expenses::ActiveModel::from(&expense)
            .insert(&self.database)
            .await?;
        Ok(expense)
    }

    pub async fn expense(&self, user_id: Uuid, id: Uuid) -> ResultEngine<Expense> {
        let model = self.require_expense(&self.database, user_id, id).await?;
        Expense::try_from(model)
    }

    /// List expenses by date, optionally restricted to a day range.
    pub async fn list_expenses(
        &self,
        user_id: Uuid,
        range: &DateRange,
    ) -> ResultEngine<Vec<Expense>> {
        self.require_user(&self.database, user_id).await?;

        let mut select =
            expenses::Entity::find().filter(expenses::Column::UserId.eq(user_id.to_string()));
        if let Some(start) = range.start() {
            select = select.filter(expenses::Column::Date.gte(start));
        }
        if let Some(end) = range.end() {
            select = select.filter(expenses::Column::Date.lte(end));
        }

        select
            .order_by_asc(expenses::Column::Date)
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    pub async fn update_expense(
        &self,
        user_id: Uuid,
        id: Uuid,
        cmd: ExpenseCmd,
    ) -> ResultEngine<Expense> {
        let expense = Expense::new(
            user_id,
            &cmd.category,
            cmd.amount,
            cmd.date,
            normalize_optional_text(cmd.description.as_deref()),
        )
        .map(|expense| Expense { id, ..expense })?;

        with_tx!(self, |db_tx| {
            self.require_expense(&db_tx, user_id, id).await?;
            expenses::ActiveModel::from(&expense).update(&db_tx).await?;
            Ok(expense)
        })
    }

    pub async fn delete_expense(&self, user_id: Uuid, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_expense(&db_tx, user_id, id).await?;
            expenses::Entity::delete_by_id(id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    async fn require_expense<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
        id: Uuid,
    ) -> ResultEngine<expenses::Model> {
        self.require_user(db, user_id).await?;
        expenses::Entity::find_by_id(id.to_string())
            .filter(expenses::Column::UserId.eq(user_id.to_string()))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("expense not exists".to_string()))
    }
}
