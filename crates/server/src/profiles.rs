//! Notification profile endpoints

use api_types::profile::{ProfileUpsert, ProfileView};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use engine::{EngineError, Money, Profile, ProfileCmd};
use uuid::Uuid;

use crate::{Reply, reply, server::ServerState};

fn view(profile: Profile) -> ProfileView {
    ProfileView {
        user_id: profile.user_id,
        phone_number: profile.phone_number,
        email_notifications: profile.email_notifications,
        sms_notifications: profile.sms_notifications,
        low_balance_threshold_minor: profile.low_balance_threshold.cents(),
    }
}

pub async fn get(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
) -> Reply<ProfileView> {
    let profile = state
        .engine
        .profile(user_id)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound("profile not exists".to_string()))?;
    reply("Profile details retrieved successfully.", view(profile))
}

/// Create the profile or update the fields present in the body.
pub async fn upsert(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    payload: Result<Json<ProfileUpsert>, JsonRejection>,
) -> Reply<ProfileView> {
    let Json(payload) = payload?;
    let cmd = ProfileCmd {
        phone_number: payload.phone_number,
        email_notifications: payload.email_notifications,
        sms_notifications: payload.sms_notifications,
        low_balance_threshold: payload.low_balance_threshold_minor.map(Money::new),
    };
    let profile = state.engine.upsert_profile(user_id, cmd).await?;
    reply("Profile updated successfully.", view(profile))
}

pub async fn delete(State(state): State<ServerState>, Path(user_id): Path<Uuid>) -> Reply<()> {
    state.engine.delete_profile(user_id).await?;
    reply("Profile deleted successfully.", ())
}
