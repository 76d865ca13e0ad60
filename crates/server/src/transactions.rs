//! Transactions API endpoints

use api_types::{
    DateQuery,
    transaction::{
        ExportFormat, TransactionExport, TransactionKind as ApiKind, TransactionList,
        TransactionNew, TransactionUpdate, TransactionView,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::{JsonRejection, QueryRejection}},
    response::Response,
};
use chrono::NaiveDate;
use engine::{DateRange, Money, Transaction, TransactionCmd, TransactionListFilter};
use uuid::Uuid;

use crate::{
    Created, Reply, ServerError, created,
    reports::{Charts, attachment},
    reply,
    server::ServerState,
};

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Deposit => ApiKind::Deposit,
        engine::TransactionKind::Withdrawal => ApiKind::Withdrawal,
        engine::TransactionKind::Transfer => ApiKind::Transfer,
        engine::TransactionKind::Payment => ApiKind::Payment,
    }
}

fn engine_kind(kind: ApiKind) -> engine::TransactionKind {
    match kind {
        ApiKind::Deposit => engine::TransactionKind::Deposit,
        ApiKind::Withdrawal => engine::TransactionKind::Withdrawal,
        ApiKind::Transfer => engine::TransactionKind::Transfer,
        ApiKind::Payment => engine::TransactionKind::Payment,
    }
}

pub(crate) fn view(tx: Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: map_kind(tx.kind),
        amount_minor: tx.amount.cents(),
        amount: tx.amount.to_string(),
        occurred_at: tx.occurred_at,
        description: tx.description,
    }
}

fn cmd(payload: TransactionNew) -> TransactionCmd {
    TransactionCmd::new(engine_kind(payload.kind), Money::new(payload.amount_minor))
        .description(payload.description)
}

/// Run the post-write hook. The transaction is already stored: failures are
/// logged and never change the response.
async fn after_create(state: &ServerState, tx: &Transaction) {
    match state.hook.after_create(&state.engine, tx).await {
        Ok(report) => {
            tracing::debug!(transaction = %tx.id, dispatches = report.dispatches(), "hook done");
        }
        Err(err) => {
            tracing::error!(transaction = %tx.id, "transaction hook failed: {err}");
        }
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    query: Result<Query<TransactionList>, QueryRejection>,
) -> Reply<Vec<TransactionView>> {
    let Query(query) = query?;
    let filter = TransactionListFilter {
        range: DateRange::new(query.start_date, query.end_date)?,
        kind: query.kind.map(engine_kind),
    };
    let txs = state.engine.list_transactions(user_id, &filter).await?;
    reply(
        "Transaction list retrieved successfully.",
        txs.into_iter().map(view).collect(),
    )
}

pub async fn create(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    payload: Result<Json<TransactionNew>, JsonRejection>,
) -> Created<TransactionView> {
    let Json(payload) = payload?;
    let tx = state.engine.create_transaction(user_id, cmd(payload)).await?;
    after_create(&state, &tx).await;
    created("Transaction created successfully.", view(tx))
}

/// Insert every transaction or none, then run the hook once per row.
pub async fn bulk_create(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    payload: Result<Json<Vec<TransactionNew>>, JsonRejection>,
) -> Created<Vec<TransactionView>> {
    let Json(payload) = payload?;
    let txs = state
        .engine
        .create_transactions(user_id, payload.into_iter().map(cmd).collect())
        .await?;
    for tx in &txs {
        after_create(&state, tx).await;
    }
    created(
        "Bulk transactions created successfully.",
        txs.into_iter().map(view).collect(),
    )
}

/// Replace every listed transaction or none. No notification is sent.
pub async fn bulk_update(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    payload: Result<Json<Vec<TransactionUpdate>>, JsonRejection>,
) -> Reply<Vec<TransactionView>> {
    let Json(payload) = payload?;
    let updates = payload
        .into_iter()
        .map(|item| {
            let cmd = TransactionCmd::new(engine_kind(item.kind), Money::new(item.amount_minor))
                .description(item.description);
            (item.id, cmd)
        })
        .collect();
    let txs = state.engine.update_transactions(user_id, updates).await?;
    reply(
        "Bulk transactions updated successfully.",
        txs.into_iter().map(view).collect(),
    )
}

pub async fn filter_by_date(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Reply<Vec<TransactionView>> {
    let Query(query) = query?;
    let range = DateRange::new(query.start_date, query.end_date)?;
    let txs = state
        .engine
        .list_transactions(user_id, &TransactionListFilter::range(range))
        .await?;
    reply(
        "Filtered transactions retrieved successfully.",
        txs.into_iter().map(view).collect(),
    )
}

pub async fn analytics(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
) -> Reply<Charts> {
    let [bar_chart, line_chart] = state.engine.transaction_charts(user_id).await?;
    reply(
        "Transaction analytics generated successfully.",
        Charts {
            bar_chart,
            line_chart,
        },
    )
}

pub async fn export(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    query: Result<Query<TransactionExport>, QueryRejection>,
) -> Result<Response, ServerError> {
    let Query(query) = query?;
    let range = DateRange::new(query.start_date, query.end_date)?;
    let txs = state.engine.export_transactions(user_id, range).await?;

    let response = match query.format {
        ExportFormat::Csv => attachment(engine::render_csv(&txs)?, "text/csv", "transactions.csv"),
        ExportFormat::Pdf => {
            let period = format!(
                "From {} to {}",
                describe_bound(range.start()),
                describe_bound(range.end())
            );
            let pdf = engine::render_pdf("Transaction Statement", &period, &txs)?;
            attachment(pdf, "application/pdf", "transactions.pdf")
        }
    };
    Ok(response)
}

fn describe_bound(day: Option<NaiveDate>) -> String {
    day.map_or_else(|| "-".to_string(), |day| day.to_string())
}

pub async fn get(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Reply<TransactionView> {
    let tx = state.engine.transaction(user_id, id).await?;
    reply("Transaction details retrieved successfully.", view(tx))
}

/// Replace kind, amount and description. No notification is sent.
pub async fn update(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<TransactionNew>, JsonRejection>,
) -> Reply<TransactionView> {
    let Json(payload) = payload?;
    let tx = state
        .engine
        .update_transaction(user_id, id, cmd(payload))
        .await?;
    reply("Transaction updated successfully.", view(tx))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Reply<()> {
    state.engine.delete_transaction(user_id, id).await?;
    reply("Transaction deleted successfully.", ())
}
