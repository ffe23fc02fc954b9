//! Usaha Kas is a bookkeeping service for a small rental and restaurant
//! business: operators log per-asset income transactions (car rentals,
//! speedboat trips, restaurant cash sales) and monthly fixed expenses, and
//! the service derives monthly reports (income by asset, operating costs,
//! cash balances).
//!
//! This library provides a JSON REST API over an embedded SQLite database.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod asset;
mod db;
mod endpoints;
mod expense;
mod period;
mod report;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use asset::{AssetType, RentalType};
pub use db::initialize as initialize_db;
pub use expense::{
    MonthlyExpense, MonthlyExpenseInput, get_monthly_expense, upsert_monthly_expense,
};
pub use period::{Period, month_options};
pub use report::{
    AssetSummary, DayTotals, RentalSplit, ReportSummary, asset_names, balance, daily_breakdown,
    daily_cash, daily_income, daily_operational_expense, group_by_asset, remaining_cash,
    summarize, total_cash, total_income, total_monthly_expense, total_operational_expense,
};
pub use routing::build_router;
pub use transaction::{
    NewTransaction, Transaction, TransactionEntry, create_transaction,
    get_transactions_for_month,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more fields required for the chosen asset/rental combination
    /// were missing from a transaction entry.
    ///
    /// Carries the names of every missing field so the client can report
    /// them all at once. Submission must be blocked; there is no partial
    /// entry.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A trip or day count of zero was supplied for a transaction entry.
    ///
    /// Counts measure billable unit events, so they start at one. Blank
    /// counts are defaulted, but an explicit zero is rejected rather than
    /// silently corrected.
    #[error("{0} must be at least 1")]
    InvalidCount(&'static str),

    /// A negative amount was supplied for a field that holds a non-negative
    /// monetary value (restaurant cash sales, monthly expense components).
    #[error("{0} must not be negative")]
    NegativeAmount(&'static str),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// parameters (e.g., period) are correct and that the resource has been
    /// created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The period string could not be parsed as `YYYY-MM`.
    #[error("could not parse \"{0}\" as a YYYY-MM period")]
    InvalidPeriod(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::MissingFields(_) | Error::InvalidCount(_) | Error::NegativeAmount(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            Error::InvalidPeriod(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred, check the server logs for more details".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
