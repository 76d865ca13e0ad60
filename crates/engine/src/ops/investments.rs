use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{DateRange, EngineError, Investment, InvestmentCmd, ResultEngine, investments};

use super::{Engine, with_tx};

impl Engine {
    pub async fn create_investment(
        &self,
        user_id: Uuid,
        cmd: InvestmentCmd,
    ) -> ResultEngine<Investment> {
        let investment = Investment::new(user_id, &cmd.investment_type, cmd.amount, Utc::now())?;
        self.require_user(&self.database, user_id).await?;
        investments::ActiveModel::from(&investment)
            .insert(&self.database)
            .await?;
        Ok(investment)
    }

    pub async fn investment(&self, user_id: Uuid, id: Uuid) -> ResultEngine<Investment> {
        let model = self.require_investment(&self.database, user_id, id).await?;
        Investment::try_from(model)
    }

    /// List investments in chronological order, optionally restricted to a
    /// day range.
    pub async fn list_investments(
        &self,
        user_id: Uuid,
        range: &DateRange,
    ) -> ResultEngine<Vec<Investment>> {
        self.require_user(&self.database, user_id).await?;

        let mut select =
            investments::Entity::find().filter(investments::Column::UserId.eq(user_id.to_string()));
        if let Some(from) = range.lower_instant() {
            select = select.filter(investments::Column::OccurredAt.gte(from));
        }
        if let Some(to) = range.upper_instant() {
            select = select.filter(investments::Column::OccurredAt.lt(to));
        }

        select
            .order_by_asc(investments::Column::OccurredAt)
            .order_by_asc(investments::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Investment::try_from)
            .collect()
    }

    pub async fn update_investment(
        &self,
        user_id: Uuid,
        id: Uuid,
        cmd: InvestmentCmd,
    ) -> ResultEngine<Investment> {
        with_tx!(self, |db_tx| {
            let model = self.require_investment(&db_tx, user_id, id).await?;
            let investment =
                Investment::new(user_id, &cmd.investment_type, cmd.amount, model.occurred_at)
                    .map(|investment| Investment { id, ..investment })?;
            investments::ActiveModel::from(&investment)
                .update(&db_tx)
                .await?;
            Ok(investment)
        })
    }

    pub async fn delete_investment(&self, user_id: Uuid, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_investment(&db_tx, user_id, id).await?;
            investments::Entity::delete_by_id(id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    async fn require_investment<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
        id: Uuid,
    ) -> ResultEngine<investments::Model> {
        self.require_user(db, user_id).await?;
        investments::Entity::find_by_id(id.to_string())
            .filter(investments::Column::UserId.eq(user_id.to_string()))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("investment not exists".to_string()))
    }
}
