use sea_orm::{QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*, sea_query::Expr};
use uuid::Uuid;

use crate::{Budget, BudgetCmd, EngineError, Money, ResultEngine, budgets};

use super::{Engine, with_tx};

/// Sum of budgeted amounts for one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

/// Budget totals, overall and per category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BudgetAnalytics {
    pub total: Money,
    pub by_category: Vec<CategoryTotal>,
}

impl Engine {
    pub async fn create_budget(&self, user_id: Uuid, cmd: BudgetCmd) -> ResultEngine<Budget> {
        let budget = Budget::new(
            user_id,
            &cmd.category,
            cmd.amount,
            cmd.start_date,
            cmd.end_date,
        )?;
        self.require_user(&self.database, user_id).await?;
        budgets::ActiveModel::from(&budget)
            .insert(&self.database)
            .await?;
        Ok(budget)
    }

    pub async fn budget(&self, user_id: Uuid, id: Uuid) -> ResultEngine<Budget> {
        let model = self.require_budget(&self.database, user_id, id).await?;
        Budget::try_from(model)
    }

    pub async fn list_budgets(&self, user_id: Uuid) -> ResultEngine<Vec<Budget>> {
        self.require_user(&self.database, user_id).await?;
        budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(budgets::Column::StartDate)
            .order_by_asc(budgets::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Budget::try_from)
            .collect()
    }

    pub async fn update_budget(
        &self,
        user_id: Uuid,
        id: Uuid,
        cmd: BudgetCmd,
    ) -> ResultEngine<Budget> {
        let budget = Budget::new(
            user_id,
            &cmd.category,
            cmd.amount,
            cmd.start_date,
            cmd.end_date,
        )
        .map(|budget| Budget { id, ..budget })?;

        with_tx!(self, |db_tx| {
            self.require_budget(&db_tx, user_id, id).await?;
            budgets::ActiveModel::from(&budget).update(&db_tx).await?;
            Ok(budget)
        })
    }

    pub async fn delete_budget(&self, user_id: Uuid, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_budget(&db_tx, user_id, id).await?;
            budgets::Entity::delete_by_id(id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Total budgeted amount and the breakdown per category, sorted by
    /// category name.
    pub async fn budget_analytics(&self, user_id: Uuid) -> ResultEngine<BudgetAnalytics> {
        self.require_user(&self.database, user_id).await?;

        let rows: Vec<(String, Option<i64>)> = budgets::Entity::find()
            .select_only()
            .column(budgets::Column::Category)
            .column_as(Expr::col(budgets::Column::AmountMinor).sum(), "total")
            .filter(budgets::Column::UserId.eq(user_id.to_string()))
            .group_by(budgets::Column::Category)
            .order_by_asc(budgets::Column::Category)
            .into_tuple()
            .all(&self.database)
            .await?;

        let by_category: Vec<CategoryTotal> = rows
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category,
                total: Money::new(total.unwrap_or_default()),
            })
            .collect();
        let total = by_category.iter().map(|c| c.total).sum();

        Ok(BudgetAnalytics { total, by_category })
    }

    async fn require_budget<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
        id: Uuid,
    ) -> ResultEngine<budgets::Model> {
        self.require_user(db, user_id).await?;
        budgets::Entity::find_by_id(id.to_string())
            .filter(budgets::Column::UserId.eq(user_id.to_string()))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("budget not exists".to_string()))
    }
}
