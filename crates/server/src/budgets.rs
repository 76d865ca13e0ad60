//! Budgets API endpoints

use api_types::budget::{BudgetAnalyticsView, BudgetNew, BudgetView, CategoryTotalView};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use engine::{Budget, BudgetCmd, Money};
use uuid::Uuid;

use crate::{Created, Reply, created, reply, server::ServerState};

fn view(budget: Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        category: budget.category,
        amount_minor: budget.amount.cents(),
        start_date: budget.start_date,
        end_date: budget.end_date,
    }
}

fn cmd(payload: BudgetNew) -> BudgetCmd {
    BudgetCmd {
        category: payload.category,
        amount: Money::new(payload.amount_minor),
        start_date: payload.start_date,
        end_date: payload.end_date,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
) -> Reply<Vec<BudgetView>> {
    let budgets = state.engine.list_budgets(user_id).await?;
    reply(
        "Budget list retrieved successfully.",
        budgets.into_iter().map(view).collect(),
    )
}

pub async fn create(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    payload: Result<Json<BudgetNew>, JsonRejection>,
) -> Created<BudgetView> {
    let Json(payload) = payload?;
    let budget = state.engine.create_budget(user_id, cmd(payload)).await?;
    created("Budget created successfully.", view(budget))
}

/// Total budgeted amount and per-category sums.
pub async fn analytics(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
) -> Reply<BudgetAnalyticsView> {
    let analytics = state.engine.budget_analytics(user_id).await?;
    reply(
        "Budget analytics generated successfully.",
        BudgetAnalyticsView {
            total_budget_minor: analytics.total.cents(),
            budget_by_category: analytics
                .by_category
                .into_iter()
                .map(|c| CategoryTotalView {
                    category: c.category,
                    total_minor: c.total.cents(),
                })
                .collect(),
        },
    )
}

pub async fn get(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Reply<BudgetView> {
    let budget = state.engine.budget(user_id, id).await?;
    reply("Budget details retrieved successfully.", view(budget))
}

pub async fn update(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<BudgetNew>, JsonRejection>,
) -> Reply<BudgetView> {
    let Json(payload) = payload?;
    let budget = state.engine.update_budget(user_id, id, cmd(payload)).await?;
    reply("Budget updated successfully.", view(budget))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Reply<()> {
    state.engine.delete_budget(user_id, id).await?;
    reply("Budget deleted successfully.", ())
}
