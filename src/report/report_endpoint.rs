//! Defines the endpoint that derives the monthly report.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    asset::AssetType,
    expense::{MonthlyExpense, get_monthly_expense},
    period::Period,
    report::{
        aggregation::asset_names,
        summary::{DayTotals, ReportSummary, daily_breakdown, summarize},
    },
    transaction::{Transaction, get_transactions_for_month},
};

/// The state needed to derive a report.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The database connection the report reads from.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The full report for one month.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// The period the report covers.
    pub period: Period,
    /// How many days the period has.
    pub days_in_month: u8,
    /// The cars seen this month, in first-seen order.
    pub car_names: Vec<String>,
    /// The speedboats seen this month, in first-seen order.
    pub speedboat_names: Vec<String>,
    /// The derived totals and per-asset figures.
    pub summary: ReportSummary,
    /// Per-day totals for calendar drill-down.
    pub days: Vec<DayTotals>,
    /// The month's transactions.
    pub transactions: Vec<Transaction>,
    /// The month's expense record, if one has been entered.
    pub monthly_expense: Option<MonthlyExpense>,
    /// Set when the transaction fetch failed and the report was derived
    /// from the expense record alone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_error: Option<String>,
    /// Set when the expense fetch failed and the report was derived from
    /// the transactions alone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_error: Option<String>,
}

/// A route handler that derives the report for the given period.
///
/// The two fetches are independent: if exactly one fails, the report is
/// still derived from the other and the failed section is named in the
/// response instead of being silently zeroed. Only a double failure is an
/// internal error.
pub async fn get_report_endpoint(
    State(state): State<ReportState>,
    Path(period): Path<Period>,
) -> Response {
    let Ok(connection) = state.db_connection.lock() else {
        return Error::DatabaseLockError.into_response();
    };

    let transactions_result = get_transactions_for_month(period, &connection);
    let expense_result = get_monthly_expense(period, &connection);
    drop(connection);

    let (transactions, transaction_error) = match transactions_result {
        Ok(transactions) => (transactions, None),
        Err(error) => {
            if expense_result.is_err() {
                tracing::error!("both report fetches failed for {period}: {error}");
                return error.into_response();
            }

            tracing::error!("could not load transactions for {period}: {error}");
            (Vec::new(), Some("could not load transactions".to_owned()))
        }
    };

    let (monthly_expense, expense_error) = match expense_result {
        Ok(expense) => (expense, None),
        Err(error) => {
            tracing::error!("could not load the monthly expense for {period}: {error}");
            (None, Some("could not load the monthly expense".to_owned()))
        }
    };

    let summary = summarize(&transactions, monthly_expense.as_ref());
    let days = daily_breakdown(&transactions, period.days_in_month());

    Json(ReportResponse {
        period,
        days_in_month: period.days_in_month(),
        car_names: asset_names(&transactions, AssetType::Car),
        speedboat_names: asset_names(&transactions, AssetType::Speedboat),
        summary,
        days,
        transactions,
        monthly_expense,
        transaction_error,
        expense_error,
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::Response,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        asset::{AssetType, RentalType},
        db::initialize,
        expense::{MonthlyExpenseInput, upsert_monthly_expense},
        transaction::{NewTransaction, create_transaction},
    };

    use super::{ReportState, get_report_endpoint};

    fn get_test_state() -> ReportState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        ReportState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn seed_sample_month(state: &ReportState) {
        let connection = state.db_connection.lock().unwrap();

        create_transaction(
            NewTransaction {
                date: date!(2025 - 08 - 05),
                asset_type: AssetType::Car,
                asset_name: "Veloz 2021 DR 1359 DT".to_owned(),
                rental_type: Some(RentalType::Drop),
                price: 300_000.0,
                fuel_cost: 20_000.0,
                driver_cost: 15_000.0,
                trips: 3,
                days: 1,
                daily_cash: 30_000.0,
                route: Some("Mataram - Senggigi".to_owned()),
            },
            &connection,
        )
        .unwrap();

        create_transaction(
            NewTransaction {
                date: date!(2025 - 08 - 10),
                asset_type: AssetType::Restaurant,
                asset_name: "Resto".to_owned(),
                rental_type: None,
                price: 0.0,
                fuel_cost: 0.0,
                driver_cost: 0.0,
                trips: 1,
                days: 1,
                daily_cash: 150_000.0,
                route: None,
            },
            &connection,
        )
        .unwrap();

        upsert_monthly_expense(
            "2025-08".parse().unwrap(),
            MonthlyExpenseInput {
                date: date!(2025 - 08 - 01),
                staff_salary: None,
                night_guard_salary: None,
                electricity_bill: Some(500_000.0),
                water_bill: None,
                internet_bill: None,
                other_expenses: None,
            },
            &connection,
        )
        .unwrap();
    }

    async fn response_body(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn derives_the_full_report() {
        let state = get_test_state();
        seed_sample_month(&state);

        let response =
            get_report_endpoint(State(state), Path("2025-08".parse().unwrap())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let report = response_body(response).await;

        assert_eq!(report["days_in_month"], 31);
        assert_eq!(report["car_names"][0], "Veloz 2021 DR 1359 DT");
        assert_eq!(report["summary"]["total_income"], 300_000.0);
        assert_eq!(report["summary"]["total_operational_expense"], 35_000.0);
        assert_eq!(report["summary"]["total_cash"], 180_000.0);
        assert_eq!(
            report["summary"]["balance"],
            300_000.0 - 35_000.0 - 500_000.0
        );
        assert_eq!(report["summary"]["remaining_cash"], 180_000.0 - 500_000.0);
        assert_eq!(report["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(report["monthly_expense"]["total_expense"], 500_000.0);
        assert!(report.get("transaction_error").is_none());
        assert!(report.get("expense_error").is_none());
    }

    #[tokio::test]
    async fn empty_month_derives_all_zeros() {
        let state = get_test_state();

        let response =
            get_report_endpoint(State(state), Path("2025-01".parse().unwrap())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let report = response_body(response).await;

        assert_eq!(report["summary"]["total_income"], 0.0);
        assert_eq!(report["summary"]["remaining_cash"], 0.0);
        assert_eq!(report["monthly_expense"], serde_json::Value::Null);
        assert_eq!(report["days"].as_array().unwrap().len(), 31);
    }

    #[tokio::test]
    async fn expense_fetch_failure_still_renders_transactions() {
        let state = get_test_state();
        seed_sample_month(&state);
        {
            let connection = state.db_connection.lock().unwrap();
            connection
                .execute("DROP TABLE monthly_expense", ())
                .unwrap();
        }

        let response =
            get_report_endpoint(State(state), Path("2025-08".parse().unwrap())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let report = response_body(response).await;

        assert_eq!(report["summary"]["total_income"], 300_000.0);
        assert_eq!(report["summary"]["total_monthly_expense"], 0.0);
        assert_eq!(report["expense_error"], "could not load the monthly expense");
        assert!(report.get("transaction_error").is_none());
    }

    #[tokio::test]
    async fn transaction_fetch_failure_still_renders_expenses() {
        let state = get_test_state();
        seed_sample_month(&state);
        {
            let connection = state.db_connection.lock().unwrap();
            connection.execute("DROP TABLE \"transaction\"", ()).unwrap();
        }

        let response =
            get_report_endpoint(State(state), Path("2025-08".parse().unwrap())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let report = response_body(response).await;

        assert_eq!(report["transaction_error"], "could not load transactions");
        assert_eq!(report["summary"]["total_income"], 0.0);
        assert_eq!(report["monthly_expense"]["total_expense"], 500_000.0);
        assert_eq!(report["summary"]["remaining_cash"], -500_000.0);
    }

    #[tokio::test]
    async fn double_fetch_failure_is_an_internal_error() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            connection.execute("DROP TABLE \"transaction\"", ()).unwrap();
            connection
                .execute("DROP TABLE monthly_expense", ())
                .unwrap();
        }

        let response =
            get_report_endpoint(State(state), Path("2025-08".parse().unwrap())).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
