use api_types::ApiResponse;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;
use serde::Serialize;

pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod budgets;
mod expenses;
mod investments;
mod profiles;
mod reports;
mod savings_goals;
mod server;
mod transactions;
mod users;

pub mod types {
    pub use api_types::{ApiResponse, DateQuery};

    pub mod user {
        pub use api_types::user::{UserNew, UserView};
    }

    pub mod profile {
        pub use api_types::profile::{ProfileUpsert, ProfileView};
    }

    pub mod transaction {
        pub use api_types::transaction::{
            ExportFormat, TransactionExport, TransactionKind, TransactionList, TransactionNew,
            TransactionView,
        };
    }

    pub mod report {
        pub use api_types::balance::BalanceView;
        pub use api_types::notification::NotificationView;
        pub use api_types::statement::{StatementFormat, StatementQuery, StatementView};
        pub use engine::Chart;
    }

    pub mod investment {
        pub use api_types::investment::{InvestmentNew, InvestmentView};
    }

    pub mod budget {
        pub use api_types::budget::{BudgetAnalyticsView, BudgetNew, BudgetView, CategoryTotalView};
    }

    pub mod expense {
        pub use api_types::expense::{ExpenseNew, ExpenseView};
    }

    pub mod savings_goal {
        pub use api_types::savings_goal::{SavingsGoalNew, SavingsGoalView};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) | EngineError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidDateRange(_)
        | EngineError::InvalidInput(_)
        | EngineError::InvalidId(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Report(report_err) => {
            tracing::error!("report rendering failed: {report_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ApiResponse::error(message))).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

type Reply<T> = Result<Json<ApiResponse<T>>, ServerError>;
type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>), ServerError>;

fn reply<T: Serialize>(message: impl Into<String>, data: T) -> Reply<T> {
    Ok(Json(ApiResponse::ok(message, data)))
}

fn created<T: Serialize>(message: impl Into<String>, data: T) -> Created<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message, data))))
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        for err in [
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InvalidDateRange("x".to_string()),
            EngineError::InvalidInput("x".to_string()),
            EngineError::InvalidId("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn errors_use_the_envelope() {
        let res = ServerError::from(EngineError::InvalidAmount(
            "the amount must be greater than zero".to_string(),
        ))
        .into_response();

        assert_eq!(
            body_json(res).await,
            serde_json::json!({
                "success": false,
                "message": "Invalid amount: the amount must be greater than zero",
                "data": null,
            })
        );
    }

    #[tokio::test]
    async fn report_errors_are_hidden() {
        let res = ServerError::from(EngineError::Report("font missing".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(res).await["message"], "internal server error");
    }
}
