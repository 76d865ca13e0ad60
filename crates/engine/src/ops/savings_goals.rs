use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, SavingsGoal, SavingsGoalCmd, savings_goals};

use super::{Engine, with_tx};

impl Engine {
    pub async fn create_savings_goal(
        &self,
        user_id: Uuid,
        cmd: SavingsGoalCmd,
    ) -> ResultEngine<SavingsGoal> {
        let goal = SavingsGoal::new(
            user_id,
            &cmd.goal_name,
            cmd.target_amount,
            cmd.current_amount,
            cmd.start_date,
            cmd.end_date,
        )?;
        self.require_user(&self.database, user_id).await?;
        savings_goals::ActiveModel::from(&goal)
            .insert(&self.database)
            .await?;
        Ok(goal)
    }

    pub async fn savings_goal(&self, user_id: Uuid, id: Uuid) -> ResultEngine<SavingsGoal> {
        let model = self.require_savings_goal(&self.database, user_id, id).await?;
        SavingsGoal::try_from(model)
    }

    pub async fn list_savings_goals(&self, user_id: Uuid) -> ResultEngine<Vec<SavingsGoal>> {
        self.require_user(&self.database, user_id).await?;
        savings_goals::Entity::find()
            .filter(savings_goals::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(savings_goals::Column::EndDate)
            .order_by_asc(savings_goals::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(SavingsGoal::try_from)
            .collect()
    }

    /// Goals whose saved amount is still below the target.
    pub async fn active_savings_goals(&self, user_id: Uuid) -> ResultEngine<Vec<SavingsGoal>> {
        Ok(self
            .list_savings_goals(user_id)
            .await?
            .into_iter()
            .filter(SavingsGoal::is_active)
            .collect())
    }

    pub async fn update_savings_goal(
        &self,
        user_id: Uuid,
        id: Uuid,
        cmd: SavingsGoalCmd,
    ) -> ResultEngine<SavingsGoal> {
        let goal = SavingsGoal::new(
            user_id,
            &cmd.goal_name,
            cmd.target_amount,
            cmd.current_amount,
            cmd.start_date,
            cmd.end_date,
        )
        .map(|goal| SavingsGoal { id, ..goal })?;

        with_tx!(self, |db_tx| {
            self.require_savings_goal(&db_tx, user_id, id).await?;
            savings_goals::ActiveModel::from(&goal)
                .update(&db_tx)
                .await?;
            Ok(goal)
        })
    }

    pub async fn delete_savings_goal(&self, user_id: Uuid, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_savings_goal(&db_tx, user_id, id).await?;
            savings_goals::Entity::delete_by_id(id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    async fn require_savings_goal<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
        id: Uuid,
    ) -> ResultEngine<savings_goals::Model> {
        self.require_user(db, user_id).await?;
        savings_goals::Entity::find_by_id(id.to_string())
            .filter(savings_goals::Column::UserId.eq(user_id.to_string()))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("savings goal not exists".to_string()))
    }
}
