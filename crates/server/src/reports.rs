//! Balance, statement and other read-only endpoints

use std::collections::BTreeMap;

use api_types::{
    balance::BalanceView,
    notification::NotificationView,
    statement::{StatementFormat, StatementQuery, StatementView},
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::header,
    response::{IntoResponse, Response},
};
use engine::{Chart, EngineError, Notification};
use serde::Serialize;
use uuid::Uuid;

use crate::{ApiResponse, Reply, ServerError, reply, server::ServerState, transactions};

#[derive(Serialize)]
pub struct Charts {
    pub bar_chart: Chart,
    pub line_chart: Chart,
}

/// A file download.
pub(crate) fn attachment(bytes: Vec<u8>, content_type: &'static str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Current balance. Only users with a profile have one.
pub async fn balance(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
) -> Reply<BalanceView> {
    if state.engine.profile(user_id).await?.is_none() {
        return Err(EngineError::KeyNotFound("profile not exists".to_string()).into());
    }
    let balance = state.engine.balance(user_id).await?;
    reply(
        "Current balance retrieved successfully.",
        BalanceView {
            balance_minor: balance.total().cents(),
            balance: balance.total().to_string(),
            deposits_minor: balance.deposits.cents(),
            withdrawals_minor: balance.withdrawals.cents(),
        },
    )
}

pub async fn statement(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
    query: Result<Query<StatementQuery>, QueryRejection>,
) -> Result<Response, ServerError> {
    let Query(query) = query?;
    let (Some(start), Some(end)) = (query.start_date, query.end_date) else {
        return Err(ServerError::Generic(
            "both start_date and end_date must be provided as YYYY-MM-DD".to_string(),
        ));
    };
    let statement = state.engine.statement(user_id, start, end).await?;

    let response = match query.format {
        StatementFormat::Json => Json(ApiResponse::ok(
            "Account statement generated successfully.",
            StatementView {
                start_date: statement.start,
                end_date: statement.end,
                deposits_minor: statement.deposits().cents(),
                withdrawals_minor: statement.withdrawals().cents(),
                transactions: statement
                    .transactions
                    .into_iter()
                    .map(transactions::view)
                    .collect(),
            },
        ))
        .into_response(),
        StatementFormat::Csv => attachment(
            engine::render_csv(&statement.transactions)?,
            "text/csv",
            "statement.csv",
        ),
        StatementFormat::Pdf => attachment(
            engine::render_pdf(
                "Account Statement",
                &statement.period(),
                &statement.transactions,
            )?,
            "application/pdf",
            "statement.pdf",
        ),
    };
    Ok(response)
}

fn notification_view(notification: Notification) -> NotificationView {
    NotificationView {
        id: notification.id,
        message: notification.message,
        created_at: notification.created_at,
        sent_via_email: notification.sent_via_email,
        sent_via_sms: notification.sent_via_sms,
    }
}

pub async fn notifications(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
) -> Reply<Vec<NotificationView>> {
    let notifications = state.engine.list_notifications(user_id).await?;
    reply(
        "Notification list retrieved successfully.",
        notifications.into_iter().map(notification_view).collect(),
    )
}

pub async fn financial_advice() -> Reply<BTreeMap<&'static str, &'static str>> {
    reply(
        "Financial advice retrieved successfully.",
        engine::financial_advice().into_iter().collect(),
    )
}
