//! Investments API endpoints

use api_types::{
    DateQuery,
    investment::{InvestmentNew, InvestmentView},
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::{JsonRejection, QueryRejection}},
};
use engine::{DateRange, Investment, InvestmentCmd, Money};
use uuid::Uuid;

use crate::{Created, Reply, created, reply, reports::Charts, server::ServerState};

fn view(investment: Investment) -> InvestmentView {
    InvestmentView {
        id: investment.id,
        investment_type: investment.investment_type,
        amount_minor: investment.amount.cents(),
        occurred_at: investment.occurred_at,
    }
}

fn cmd(payload: InvestmentNew) -> InvestmentCmd {
    InvestmentCmd {
        investment_type: payload.investment_type,
        amount: Money::new(payload.amount_minor),
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
) -> Reply<Vec<InvestmentView>> {
    let investments = state
        .engine
        .list_investments(user_id, &DateRange::all())
        .await?;
    reply(
        "Investment list retrieved successfully.",
        investments.into_iter().map(view).collect(),
    )
}

pub async fn create(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    payload: Result<Json<InvestmentNew>, JsonRejection>,
) -> Created<InvestmentView> {
    let Json(payload) = payload?;
    let investment = state.engine.create_investment(user_id, cmd(payload)).await?;
    created("Investment created successfully.", view(investment))
}

pub async fn filter_by_date(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Reply<Vec<InvestmentView>> {
    let Query(query) = query?;
    let range = DateRange::new(query.start_date, query.end_date)?;
    let investments = state.engine.list_investments(user_id, &range).await?;
    reply(
        "Filtered investments retrieved successfully.",
        investments.into_iter().map(view).collect(),
    )
}

pub async fn analytics(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
) -> Reply<Charts> {
    let [bar_chart, line_chart] = state.engine.investment_charts(user_id).await?;
    reply(
        "Investment analytics generated successfully.",
        Charts {
            bar_chart,
            line_chart,
        },
    )
}

pub async fn get(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Reply<InvestmentView> {
    let investment = state.engine.investment(user_id, id).await?;
    reply("Investment details retrieved successfully.", view(investment))
}

pub async fn update(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<InvestmentNew>, JsonRejection>,
) -> Reply<InvestmentView> {
    let Json(payload) = payload?;
    let investment = state
        .engine
        .update_investment(user_id, id, cmd(payload))
        .await?;
    reply("Investment updated successfully.", view(investment))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Reply<()> {
    state.engine.delete_investment(user_id, id).await?;
    reply("Investment deleted successfully.", ())
}
