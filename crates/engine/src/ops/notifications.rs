use sea_orm::{QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{Notification, ResultEngine, notifications};

use super::Engine;

impl Engine {
    /// Append an entry to the notification audit trail.
    pub async fn record_notification(&self, notification: &Notification) -> ResultEngine<()> {
        notifications::ActiveModel::from(notification)
            .insert(&self.database)
            .await?;
        Ok(())
    }

    /// The notification audit trail of a user, newest first.
    pub async fn list_notifications(&self, user_id: Uuid) -> ResultEngine<Vec<Notification>> {
        self.require_user(&self.database, user_id).await?;
        notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(notifications::Column::CreatedAt)
            .order_by_desc(notifications::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Notification::try_from)
            .collect()
    }
}
