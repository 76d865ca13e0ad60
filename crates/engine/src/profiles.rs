//! Notification profile of a user.
//!
//! One row per user at most (`user_id` is the primary key). A missing row is
//! a valid state: such users simply never receive notifications.

use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub user_id: Uuid,
    /// May be empty; an empty number suppresses text messages.
    pub phone_number: String,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub low_balance_threshold: Money,
}

impl Profile {
    /// A profile with the default preferences: email on, text off, threshold 0.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            phone_number: String::new(),
            email_notifications: true,
            sms_notifications: false,
            low_balance_threshold: Money::ZERO,
        }
    }

    /// The phone number to text, if text messages are enabled and a number
    /// is on file.
    pub fn sms_target(&self) -> Option<&str> {
        let phone = self.phone_number.trim();
        (self.sms_notifications && !phone.is_empty()).then_some(phone)
    }

    /// Returns `true` if `balance` is strictly below the configured threshold.
    pub fn is_low(&self, balance: Money) -> bool {
        balance < self.low_balance_threshold
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub phone_number: String,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub low_balance_threshold_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Profile> for ActiveModel {
    fn from(profile: &Profile) -> Self {
        Self {
            user_id: ActiveValue::Set(profile.user_id.to_string()),
            phone_number: ActiveValue::Set(profile.phone_number.clone()),
            email_notifications: ActiveValue::Set(profile.email_notifications),
            sms_notifications: ActiveValue::Set(profile.sms_notifications),
            low_balance_threshold_minor: ActiveValue::Set(profile.low_balance_threshold.cents()),
        }
    }
}

impl TryFrom<Model> for Profile {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: parse_uuid(&model.user_id, "user")?,
            phone_number: model.phone_number,
            email_notifications: model.email_notifications,
            sms_notifications: model.sms_notifications,
            low_balance_threshold: Money::new(model.low_balance_threshold_minor),
        })
    }
}
