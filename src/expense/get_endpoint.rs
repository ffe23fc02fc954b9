//! Defines the endpoint for fetching a period's expense record.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, expense::core::get_monthly_expense, period::Period};

/// The state needed to fetch a monthly expense record.
#[derive(Debug, Clone)]
pub struct GetExpenseState {
    /// The database connection for managing monthly expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns the expense record for the given period.
///
/// Responds 404 when the period has no record yet; clients treat that as
/// "not entered", not as a failure.
pub async fn get_expense_endpoint(
    State(state): State<GetExpenseState>,
    Path(period): Path<Period>,
) -> Response {
    let Ok(connection) = state.db_connection.lock() else {
        return Error::DatabaseLockError.into_response();
    };

    match get_monthly_expense(period, &connection) {
        Ok(Some(expense)) => Json(expense).into_response(),
        Ok(None) => Error::NotFound.into_response(),
        Err(error) => error.into_response(),
    }
}
