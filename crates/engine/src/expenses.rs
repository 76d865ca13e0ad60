//! Expenses: dated spending entries grouped by category.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine,
    util::{ensure_positive, normalize_required_text, parse_uuid},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl Expense {
    pub fn new(
        user_id: Uuid,
        category: &str,
        amount: Money,
        date: NaiveDate,
        description: Option<String>,
    ) -> ResultEngine<Self> {
        ensure_positive(amount, "amount")?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            category: normalize_required_text(category, "category")?,
            amount,
            date,
            description,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount_minor: i64,
    pub date: Date,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            user_id: ActiveValue::Set(expense.user_id.to_string()),
            category: ActiveValue::Set(expense.category.clone()),
            amount_minor: ActiveValue::Set(expense.amount.cents()),
            date: ActiveValue::Set(expense.date),
            description: ActiveValue::Set(expense.description.clone()),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "expense")?,
            user_id: parse_uuid(&model.user_id, "user")?,
            category: model.category,
            amount: Money::new(model.amount_minor),
            date: model.date,
            description: model.description,
        })
    }
}
