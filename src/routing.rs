//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::{
    AppState, endpoints,
    expense::{get_expense_endpoint, upsert_expense_endpoint},
    report::{get_report_endpoint, list_periods_endpoint},
    transaction::{create_transaction_endpoint, list_transactions_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS_FOR_PERIOD,
            get(list_transactions_endpoint),
        )
        .route(
            endpoints::EXPENSE_FOR_PERIOD,
            get(get_expense_endpoint).put(upsert_expense_endpoint),
        )
        .route(endpoints::REPORT_FOR_PERIOD, get(get_report_endpoint))
        .route(endpoints::PERIODS, get(list_periods_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested resource could not be found" })),
    )
        .into_response()
}
