//! Defines the endpoint for creating or updating a period's expenses.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::core::{MonthlyExpenseInput, upsert_monthly_expense},
    period::Period,
};

/// The state needed to upsert a monthly expense record.
#[derive(Debug, Clone)]
pub struct UpsertExpenseState {
    /// The database connection for managing monthly expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpsertExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that saves the expense record for the given period.
///
/// The first save for a period creates the record; later saves update it in
/// place, so a period never has more than one record. Responds 200 with the
/// stored record either way.
pub async fn upsert_expense_endpoint(
    State(state): State<UpsertExpenseState>,
    Path(period): Path<Period>,
    Json(input): Json<MonthlyExpenseInput>,
) -> Response {
    let Ok(connection) = state.db_connection.lock() else {
        return Error::DatabaseLockError.into_response();
    };

    match upsert_monthly_expense(period, input, &connection) {
        Ok(expense) => Json(expense).into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{db::initialize, expense::MonthlyExpenseInput};

    use super::{UpsertExpenseState, upsert_expense_endpoint};

    fn get_test_state() -> UpsertExpenseState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        UpsertExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn electricity_only(amount: f64) -> MonthlyExpenseInput {
        MonthlyExpenseInput {
            date: date!(2025 - 08 - 01),
            staff_salary: None,
            night_guard_salary: None,
            electricity_bill: Some(amount),
            water_bill: None,
            internet_bill: None,
            other_expenses: None,
        }
    }

    #[tokio::test]
    async fn saving_twice_overwrites_the_same_record() {
        let state = get_test_state();
        let period = Path::<crate::Period>("2025-08".parse().unwrap());

        let first = upsert_expense_endpoint(
            State(state.clone()),
            Path(period.clone()),
            Json(electricity_only(400_000.0)),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = upsert_expense_endpoint(
            State(state.clone()),
            period,
            Json(electricity_only(500_000.0)),
        )
        .await;
        assert_eq!(second.status(), StatusCode::OK);

        let connection = state.db_connection.lock().unwrap();
        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM monthly_expense", [], |row| row.get(0))
            .unwrap();
        let total: f64 = connection
            .query_row("SELECT total_expense FROM monthly_expense", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(total, 500_000.0);
    }

    #[tokio::test]
    async fn negative_components_respond_unprocessable_entity() {
        let state = get_test_state();

        let response = upsert_expense_endpoint(
            State(state),
            Path("2025-08".parse().unwrap()),
            Json(electricity_only(-1.0)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
