//! Investments owned by a user.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine,
    util::{ensure_positive, normalize_required_text, parse_uuid},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Investment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub investment_type: String,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

impl Investment {
    pub fn new(
        user_id: Uuid,
        investment_type: &str,
        amount: Money,
        occurred_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        ensure_positive(amount, "amount")?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            investment_type: normalize_required_text(investment_type, "investment type")?,
            amount,
            occurred_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "investments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub investment_type: String,
    pub amount_minor: i64,
    pub occurred_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Investment> for ActiveModel {
    fn from(investment: &Investment) -> Self {
        Self {
            id: ActiveValue::Set(investment.id.to_string()),
            user_id: ActiveValue::Set(investment.user_id.to_string()),
            investment_type: ActiveValue::Set(investment.investment_type.clone()),
            amount_minor: ActiveValue::Set(investment.amount.cents()),
            occurred_at: ActiveValue::Set(investment.occurred_at),
        }
    }
}

impl TryFrom<Model> for Investment {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "investment")?,
            user_id: parse_uuid(&model.user_id, "user")?,
            investment_type: model.investment_type,
            amount: Money::new(model.amount_minor),
            occurred_at: model.occurred_at,
        })
    }
}
