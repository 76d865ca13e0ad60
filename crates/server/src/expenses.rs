//! Expenses API endpoints

use api_types::{
    DateQuery,
    expense::{ExpenseNew, ExpenseView},
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::{JsonRejection, QueryRejection}},
};
use engine::{DateRange, Expense, ExpenseCmd, Money};
use uuid::Uuid;

use crate::{Created, Reply, created, reply, server::ServerState};

fn view(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        category: expense.category,
        amount_minor: expense.amount.cents(),
        date: expense.date,
        description: expense.description,
    }
}

fn cmd(payload: ExpenseNew) -> ExpenseCmd {
    ExpenseCmd {
        category: payload.category,
        amount: Money::new(payload.amount_minor),
        date: payload.date,
        description: payload.description,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
) -> Reply<Vec<ExpenseView>> {
    let expenses = state.engine.list_expenses(user_id, &DateRange::all()).await?;
    reply(
        "Expense list retrieved successfully.",
        expenses.into_iter().map(view).collect(),
    )
}

pub async fn create(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Created<ExpenseView> {
    let Json(payload) = payload?;
    let expense = state.engine.create_expense(user_id, cmd(payload)).await?;
    created("Expense created successfully.", view(expense))
}

pub async fn filter_by_date(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Reply<Vec<ExpenseView>> {
    let Query(query) = query?;
    let range = DateRange::new(query.start_date, query.end_date)?;
    let expenses = state.engine.list_expenses(user_id, &range).await?;
    reply(
        "Filtered expenses retrieved successfully.",
        expenses.into_iter().map(view).collect(),
    )
}

pub async fn get(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Reply<ExpenseView> {
    let expense = state.engine.expense(user_id, id).await?;
    reply("Expense details retrieved successfully.", view(expense))
}

pub async fn update(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Reply<ExpenseView> {
    let Json(payload) = payload?;
    let expense = state.engine.update_expense(user_id, id, cmd(payload)).await?;
    reply("Expense updated successfully.", view(expense))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Reply<()> {
    state.engine.delete_expense(user_id, id).await?;
    reply("Expense deleted successfully.", ())
}
