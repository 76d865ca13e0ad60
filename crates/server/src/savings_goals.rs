//! Savings goals API endpoints

use api_types::savings_goal::{SavingsGoalNew, SavingsGoalView};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use engine::{Money, SavingsGoal, SavingsGoalCmd};
use uuid::Uuid;

use crate::{Created, Reply, created, reply, server::ServerState};

fn view(goal: SavingsGoal) -> SavingsGoalView {
    SavingsGoalView {
        id: goal.id,
        goal_name: goal.goal_name,
        target_amount_minor: goal.target_amount.cents(),
        current_amount_minor: goal.current_amount.cents(),
        start_date: goal.start_date,
        end_date: goal.end_date,
    }
}

fn cmd(payload: SavingsGoalNew) -> SavingsGoalCmd {
    SavingsGoalCmd {
        goal_name: payload.goal_name,
        target_amount: Money::new(payload.target_amount_minor),
        current_amount: Money::new(payload.current_amount_minor),
        start_date: payload.start_date,
        end_date: payload.end_date,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
) -> Reply<Vec<SavingsGoalView>> {
    let goals = state.engine.list_savings_goals(user_id).await?;
    reply(
        "Savings goal list retrieved successfully.",
        goals.into_iter().map(view).collect(),
    )
}

pub async fn create(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    payload: Result<Json<SavingsGoalNew>, JsonRejection>,
) -> Created<SavingsGoalView> {
    let Json(payload) = payload?;
    let goal = state.engine.create_savings_goal(user_id, cmd(payload)).await?;
    created("Savings goal created successfully.", view(goal))
}

/// Goals whose current amount is still below the target.
pub async fn active(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
) -> Reply<Vec<SavingsGoalView>> {
    let goals = state.engine.active_savings_goals(user_id).await?;
    reply(
        "Active savings goals retrieved successfully.",
        goals.into_iter().map(view).collect(),
    )
}

pub async fn get(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Reply<SavingsGoalView> {
    let goal = state.engine.savings_goal(user_id, id).await?;
    reply("Savings goal details retrieved successfully.", view(goal))
}

pub async fn update(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<SavingsGoalNew>, JsonRejection>,
) -> Reply<SavingsGoalView> {
    let Json(payload) = payload?;
    let goal = state
        .engine
        .update_savings_goal(user_id, id, cmd(payload))
        .await?;
    reply("Savings goal updated successfully.", view(goal))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Reply<()> {
    state.engine.delete_savings_goal(user_id, id).await?;
    reply("Savings goal deleted successfully.", ())
}
