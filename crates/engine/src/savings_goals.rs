//! Savings goals.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine,
    util::{
        ensure_date_order, ensure_positive, ensure_within_limit, normalize_required_text,
        parse_uuid,
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl SavingsGoal {
    pub fn new(
        user_id: Uuid,
        goal_name: &str,
        target_amount: Money,
        current_amount: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ResultEngine<Self> {
        let goal = Self {
            id: Uuid::new_v4(),
            user_id,
            goal_name: normalize_required_text(goal_name, "goal")?,
            target_amount,
            current_amount,
            start_date,
            end_date,
        };
        goal.validate()?;
        Ok(goal)
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        ensure_positive(self.target_amount, "target amount")?;
        ensure_within_limit(self.current_amount, "current amount")?;
        ensure_date_order(self.start_date, self.end_date)
    }

    /// A goal stays active until the saved amount reaches the target.
    pub fn is_active(&self) -> bool {
        self.current_amount < self.target_amount
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "savings_goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub goal_name: String,
    pub target_amount_minor: i64,
    pub current_amount_minor: i64,
    pub start_date: Date,
    pub end_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&SavingsGoal> for ActiveModel {
    fn from(goal: &SavingsGoal) -> Self {
        Self {
            id: ActiveValue::Set(goal.id.to_string()),
            user_id: ActiveValue::Set(goal.user_id.to_string()),
            goal_name: ActiveValue::Set(goal.goal_name.clone()),
            target_amount_minor: ActiveValue::Set(goal.target_amount.cents()),
            current_amount_minor: ActiveValue::Set(goal.current_amount.cents()),
            start_date: ActiveValue::Set(goal.start_date),
            end_date: ActiveValue::Set(goal.end_date),
        }
    }
}

impl TryFrom<Model> for SavingsGoal {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "savings goal")?,
            user_id: parse_uuid(&model.user_id, "user")?,
            goal_name: model.goal_name,
            target_amount: Money::new(model.target_amount_minor),
            current_amount: Money::new(model.current_amount_minor),
            start_date: model.start_date,
            end_date: model.end_date,
        })
    }
}
