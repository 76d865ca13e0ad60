//! Users API endpoints

use api_types::user::{UserNew, UserView};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use engine::{User, UserCmd};
use uuid::Uuid;

use crate::{Created, Reply, created, reply, server::ServerState};

pub(crate) fn view(user: User) -> UserView {
    UserView {
        id: user.id,
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
    }
}

fn cmd(payload: UserNew) -> UserCmd {
    UserCmd::new(payload.username, payload.email).name(payload.first_name, payload.last_name)
}

pub async fn list(State(state): State<ServerState>) -> Reply<Vec<UserView>> {
    let users = state.engine.list_users().await?;
    reply(
        "User list retrieved successfully.",
        users.into_iter().map(view).collect(),
    )
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<UserNew>, JsonRejection>,
) -> Created<UserView> {
    let Json(payload) = payload?;
    let user = state.engine.create_user(cmd(payload)).await?;
    created("User created successfully.", view(user))
}

pub async fn get(State(state): State<ServerState>, Path(user_id): Path<Uuid>) -> Reply<UserView> {
    let user = state.engine.user(user_id).await?;
    reply("User details retrieved successfully.", view(user))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    payload: Result<Json<UserNew>, JsonRejection>,
) -> Reply<UserView> {
    let Json(payload) = payload?;
    let user = state.engine.update_user(user_id, cmd(payload)).await?;
    reply("User updated successfully.", view(user))
}

pub async fn delete(State(state): State<ServerState>, Path(user_id): Path<Uuid>) -> Reply<()> {
    state.engine.delete_user(user_id).await?;
    reply("User deleted successfully.", ())
}
