//! Budgets: a spending allowance for a category over a date window.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine,
    util::{ensure_date_order, ensure_positive, normalize_required_text, parse_uuid},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub amount: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Budget {
    pub fn new(
        user_id: Uuid,
        category: &str,
        amount: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ResultEngine<Self> {
        let budget = Self {
            id: Uuid::new_v4(),
            user_id,
            category: normalize_required_text(category, "category")?,
            amount,
            start_date,
            end_date,
        };
        budget.validate()?;
        Ok(budget)
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        ensure_positive(self.amount, "amount")?;
        ensure_date_order(self.start_date, self.end_date)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount_minor: i64,
    pub start_date: Date,
    pub end_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Budget> for ActiveModel {
    fn from(budget: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(budget.id.to_string()),
            user_id: ActiveValue::Set(budget.user_id.to_string()),
            category: ActiveValue::Set(budget.category.clone()),
            amount_minor: ActiveValue::Set(budget.amount.cents()),
            start_date: ActiveValue::Set(budget.start_date),
            end_date: ActiveValue::Set(budget.end_date),
        }
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "budget")?,
            user_id: parse_uuid(&model.user_id, "user")?,
            category: model.category,
            amount: Money::new(model.amount_minor),
            start_date: model.start_date,
            end_date: model.end_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_inverted_window() {
        let err = Budget::new(
            Uuid::new_v4(),
            "food",
            Money::new(100),
            date(2024, 2, 1),
            date(2024, 1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDateRange(_)));
    }

    #[test]
    fn accepts_single_day_window() {
        let budget = Budget::new(
            Uuid::new_v4(),
            " food ",
            Money::new(100),
            date(2024, 1, 1),
            date(2024, 1, 1),
        )
        .unwrap();
        assert_eq!(budget.category, "food");
    }
}
