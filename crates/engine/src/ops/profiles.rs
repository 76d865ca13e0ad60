use sea_orm::{TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Profile, ProfileCmd, Recipient, ResultEngine, User, profiles,
    util::{ensure_within_limit, normalize_optional_text},
};

use super::{Engine, with_tx};

impl Engine {
    /// Return the notification profile of a user, `None` if it was never set.
    pub async fn profile(&self, user_id: Uuid) -> ResultEngine<Option<Profile>> {
        self.require_user(&self.database, user_id).await?;
        profiles::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?
            .map(Profile::try_from)
            .transpose()
    }

    /// Create the profile of a user or replace the fields given in `cmd`.
    ///
    /// Missing fields keep their current value, or the default for a new
    /// profile.
    pub async fn upsert_profile(&self, user_id: Uuid, cmd: ProfileCmd) -> ResultEngine<Profile> {
        if let Some(threshold) = cmd.low_balance_threshold {
            ensure_within_limit(threshold, "low balance threshold")?;
        }

        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let existing = profiles::Entity::find_by_id(user_id.to_string())
                .one(&db_tx)
                .await?;

            let is_new = existing.is_none();
            let mut profile = match existing {
                Some(model) => Profile::try_from(model)?,
                None => Profile::new(user_id),
            };
            if let Some(phone_number) = cmd.phone_number {
                profile.phone_number =
                    normalize_optional_text(Some(&phone_number)).unwrap_or_default();
            }
            if let Some(enabled) = cmd.email_notifications {
                profile.email_notifications = enabled;
            }
            if let Some(enabled) = cmd.sms_notifications {
                profile.sms_notifications = enabled;
            }
            if let Some(threshold) = cmd.low_balance_threshold {
                profile.low_balance_threshold = threshold;
            }

            let model = profiles::ActiveModel::from(&profile);
            if is_new {
                model.insert(&db_tx).await?;
            } else {
                model.update(&db_tx).await?;
            }
            Ok(profile)
        })
    }

    /// Remove the profile; the user stops receiving notifications.
    pub async fn delete_profile(&self, user_id: Uuid) -> ResultEngine<()> {
        self.require_user(&self.database, user_id).await?;
        let result = profiles::Entity::delete_by_id(user_id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("profile not exists".to_string()));
        }
        Ok(())
    }

    /// Resolve everything the notification path needs to know about a user
    /// with a single lookup: contact address and (optional) profile.
    pub async fn recipient(&self, user_id: Uuid) -> ResultEngine<Recipient> {
        let model = self.require_user(&self.database, user_id).await?;
        let profile = model
            .find_related(profiles::Entity)
            .one(&self.database)
            .await?
            .map(Profile::try_from)
            .transpose()?;
        let user = User::try_from(model)?;
        Ok(Recipient {
            user_id: user.id,
            email: user.email,
            profile,
        })
    }
}
