use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, User, UserCmd, budgets, expenses, investments, notifications,
    profiles, savings_goals, transactions, users,
    util::normalize_required_text,
};

use super::{Engine, with_tx};

impl Engine {
    /// Register a new user. Usernames are unique.
    pub async fn create_user(&self, cmd: UserCmd) -> ResultEngine<User> {
        let user = User {
            id: Uuid::new_v4(),
            username: normalize_required_text(&cmd.username, "username")?,
            email: cmd.email.trim().to_string(),
            first_name: cmd.first_name,
            last_name: cmd.last_name,
        };

        with_tx!(self, |db_tx| {
            self.ensure_username_free(&db_tx, &user.username, None)
                .await?;
            users::ActiveModel::from(&user).insert(&db_tx).await?;
            Ok(user)
        })
    }

    pub async fn user(&self, user_id: Uuid) -> ResultEngine<User> {
        let model = self.require_user(&self.database, user_id).await?;
        User::try_from(model)
    }

    pub async fn list_users(&self) -> ResultEngine<Vec<User>> {
        users::Entity::find()
            .order_by_asc(users::Column::Username)
            .all(&self.database)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    /// Replace the identity fields of a user.
    pub async fn update_user(&self, user_id: Uuid, cmd: UserCmd) -> ResultEngine<User> {
        let user = User {
            id: user_id,
            username: normalize_required_text(&cmd.username, "username")?,
            email: cmd.email.trim().to_string(),
            first_name: cmd.first_name,
            last_name: cmd.last_name,
        };

        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            self.ensure_username_free(&db_tx, &user.username, Some(user_id))
                .await?;
            users::ActiveModel::from(&user).update(&db_tx).await?;
            Ok(user)
        })
    }

    /// Delete a user together with every record it owns.
    pub async fn delete_user(&self, user_id: Uuid) -> ResultEngine<()> {
        let owner = user_id.to_string();
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;

            notifications::Entity::delete_many()
                .filter(notifications::Column::UserId.eq(owner.as_str()))
                .exec(&db_tx)
                .await?;
            transactions::Entity::delete_many()
                .filter(transactions::Column::UserId.eq(owner.as_str()))
                .exec(&db_tx)
                .await?;
            investments::Entity::delete_many()
                .filter(investments::Column::UserId.eq(owner.as_str()))
                .exec(&db_tx)
                .await?;
            budgets::Entity::delete_many()
                .filter(budgets::Column::UserId.eq(owner.as_str()))
                .exec(&db_tx)
                .await?;
            expenses::Entity::delete_many()
                .filter(expenses::Column::UserId.eq(owner.as_str()))
                .exec(&db_tx)
                .await?;
            savings_goals::Entity::delete_many()
                .filter(savings_goals::Column::UserId.eq(owner.as_str()))
                .exec(&db_tx)
                .await?;
            profiles::Entity::delete_by_id(owner.clone())
                .exec(&db_tx)
                .await?;
            users::Entity::delete_by_id(owner.clone())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    async fn ensure_username_free<C: ConnectionTrait>(
        &self,
        db: &C,
        username: &str,
        except: Option<Uuid>,
    ) -> ResultEngine<()> {
        let taken = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await?;
        match taken {
            Some(model) if except.is_none_or(|id| model.id != id.to_string()) => {
                Err(EngineError::ExistingKey(format!("username {username}")))
            }
            _ => Ok(()),
        }
    }
}
