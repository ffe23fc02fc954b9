//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{TransactionEntry, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction.
///
/// The entry is classified first: the daily cash accrual is computed from
/// the asset/rental combination and missing fields reject the whole entry
/// with a 422 naming them. On success responds 201 with the stored record.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Json(entry): Json<TransactionEntry>,
) -> Response {
    let new_transaction = match entry.classify() {
        Ok(new_transaction) => new_transaction,
        Err(error) => return error.into_response(),
    };

    let Ok(connection) = state.db_connection.lock() else {
        return Error::DatabaseLockError.into_response();
    };

    match create_transaction(new_transaction, &connection) {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => error.into_response(),
    }
}
