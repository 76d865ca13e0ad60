use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{
    budgets, expenses, investments, profiles, reports, savings_goals, transactions, users,
};
use engine::{Engine, TransactionHook};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Run after every transaction creation.
    pub hook: Arc<TransactionHook>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/{user_id}",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route(
            "/users/{user_id}/profile",
            get(profiles::get)
                .put(profiles::upsert)
                .delete(profiles::delete),
        )
        .route(
            "/users/{user_id}/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/users/{user_id}/transactions/bulk",
            post(transactions::bulk_create).put(transactions::bulk_update),
        )
        .route(
            "/users/{user_id}/transactions/filter_by_date",
            get(transactions::filter_by_date),
        )
        .route(
            "/users/{user_id}/transactions/analytics",
            get(transactions::analytics),
        )
        .route(
            "/users/{user_id}/transactions/export",
            get(transactions::export),
        )
        .route(
            "/users/{user_id}/transactions/{id}",
            get(transactions::get)
                .put(transactions::update)
                .delete(transactions::delete),
        )
        .route("/users/{user_id}/balance", get(reports::balance))
        .route("/users/{user_id}/statement", get(reports::statement))
        .route("/users/{user_id}/notifications", get(reports::notifications))
        .route(
            "/users/{user_id}/investments",
            get(investments::list).post(investments::create),
        )
        .route(
            "/users/{user_id}/investments/filter_by_date",
            get(investments::filter_by_date),
        )
        .route(
            "/users/{user_id}/investments/analytics",
            get(investments::analytics),
        )
        .route(
            "/users/{user_id}/investments/{id}",
            get(investments::get)
                .put(investments::update)
                .delete(investments::delete),
        )
        .route(
            "/users/{user_id}/budgets",
            get(budgets::list).post(budgets::create),
        )
        .route("/users/{user_id}/budgets/analytics", get(budgets::analytics))
        .route(
            "/users/{user_id}/budgets/{id}",
            get(budgets::get).put(budgets::update).delete(budgets::delete),
        )
        .route(
            "/users/{user_id}/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route(
            "/users/{user_id}/expenses/filter_by_date",
            get(expenses::filter_by_date),
        )
        .route(
            "/users/{user_id}/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .route(
            "/users/{user_id}/savings-goals",
            get(savings_goals::list).post(savings_goals::create),
        )
        .route(
            "/users/{user_id}/savings-goals/active",
            get(savings_goals::active),
        )
        .route(
            "/users/{user_id}/savings-goals/{id}",
            get(savings_goals::get)
                .put(savings_goals::update)
                .delete(savings_goals::delete),
        )
        .route("/financial-advice", get(reports::financial_advice))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    hook: TransactionHook,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        hook: Arc::new(hook),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    hook: TransactionHook,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, hook, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
