//! Defines the core data model and database queries for monthly expenses.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{Error, period::Period};

// ============================================================================
// MODELS
// ============================================================================

/// The fixed expenses of one calendar month.
///
/// At most one record exists per period: writes go through
/// [upsert_monthly_expense], which updates the existing record in place
/// rather than creating duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpense {
    /// The ID of the expense record. Assigned on first insert.
    pub id: i64,
    /// The period this record belongs to, the upsert key.
    pub period: Period,
    /// The date the expenses were entered for. Informational.
    pub date: Date,
    /// Monthly staff salaries.
    pub staff_salary: f64,
    /// The night guard's salary.
    pub night_guard_salary: f64,
    /// The electricity bill.
    pub electricity_bill: f64,
    /// The water bill.
    pub water_bill: f64,
    /// The internet bill.
    pub internet_bill: f64,
    /// Anything that does not fit the other five fields.
    pub other_expenses: f64,
    /// The sum of the six component fields. Recomputed on every write,
    /// never supplied independently.
    pub total_expense: f64,
}

/// The raw input for a monthly expense record.
///
/// Blank component fields coerce to 0. The total is never part of the
/// input; it is recomputed from the components on every write.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyExpenseInput {
    /// The date the expenses are entered for.
    pub date: Date,
    /// Monthly staff salaries.
    #[serde(default)]
    pub staff_salary: Option<f64>,
    /// The night guard's salary.
    #[serde(default)]
    pub night_guard_salary: Option<f64>,
    /// The electricity bill.
    #[serde(default)]
    pub electricity_bill: Option<f64>,
    /// The water bill.
    #[serde(default)]
    pub water_bill: Option<f64>,
    /// The internet bill.
    #[serde(default)]
    pub internet_bill: Option<f64>,
    /// Anything that does not fit the other five fields.
    #[serde(default)]
    pub other_expenses: Option<f64>,
}

impl MonthlyExpenseInput {
    const FIELD_NAMES: [&'static str; 6] = [
        "staff_salary",
        "night_guard_salary",
        "electricity_bill",
        "water_bill",
        "internet_bill",
        "other_expenses",
    ];

    fn components(&self) -> [f64; 6] {
        [
            self.staff_salary.unwrap_or(0.0),
            self.night_guard_salary.unwrap_or(0.0),
            self.electricity_bill.unwrap_or(0.0),
            self.water_bill.unwrap_or(0.0),
            self.internet_bill.unwrap_or(0.0),
            self.other_expenses.unwrap_or(0.0),
        ]
    }

    /// The total of the six component fields, blanks counting as 0.
    pub fn total_expense(&self) -> f64 {
        self.components().iter().sum()
    }

    fn validate(&self) -> Result<(), Error> {
        for (component, field) in self.components().iter().zip(Self::FIELD_NAMES) {
            if *component < 0.0 {
                return Err(Error::NegativeAmount(field));
            }
        }

        Ok(())
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create or update the expense record for a period.
///
/// The first write for a period inserts a record; every later write for the
/// same period updates that record in place, so the `(year, month)` key
/// stays unique. `total_expense` is recomputed from the components here on
/// every write.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if a component field is negative,
/// - or [Error::SqlError] if there is an SQL error.
pub fn upsert_monthly_expense(
    period: Period,
    input: MonthlyExpenseInput,
    connection: &Connection,
) -> Result<MonthlyExpense, Error> {
    input.validate()?;

    let [staff, night_guard, electricity, water, internet, other] = input.components();

    let expense = connection
        .prepare(
            "INSERT INTO monthly_expense
             (year, month, date, staff_salary, night_guard_salary, electricity_bill,
              water_bill, internet_bill, other_expenses, total_expense)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(year, month) DO UPDATE SET
                date = excluded.date,
                staff_salary = excluded.staff_salary,
                night_guard_salary = excluded.night_guard_salary,
                electricity_bill = excluded.electricity_bill,
                water_bill = excluded.water_bill,
                internet_bill = excluded.internet_bill,
                other_expenses = excluded.other_expenses,
                total_expense = excluded.total_expense
             RETURNING id, year, month, date, staff_salary, night_guard_salary,
                       electricity_bill, water_bill, internet_bill, other_expenses,
                       total_expense",
        )?
        .query_row(
            (
                period.year,
                period.month as u8,
                input.date,
                staff,
                night_guard,
                electricity,
                water,
                internet,
                other,
                input.total_expense(),
            ),
            map_monthly_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve the expense record for a period, or `None` if the period has
/// none yet.
///
/// Absence is an expected, common case (a month whose expenses have not
/// been entered), so it is a value rather than an error.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_monthly_expense(
    period: Period,
    connection: &Connection,
) -> Result<Option<MonthlyExpense>, Error> {
    let result = connection
        .prepare(
            "SELECT id, year, month, date, staff_salary, night_guard_salary,
                    electricity_bill, water_bill, internet_bill, other_expenses,
                    total_expense
             FROM monthly_expense
             WHERE year = :year AND month = :month",
        )?
        .query_row(
            &[(":year", &period.year), (":month", &(period.month as i32))],
            map_monthly_expense_row,
        );

    match result {
        Ok(expense) => Ok(Some(expense)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

/// Create the monthly expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_monthly_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS monthly_expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                year INTEGER NOT NULL,
                month INTEGER NOT NULL,
                date TEXT NOT NULL,
                staff_salary REAL NOT NULL DEFAULT 0,
                night_guard_salary REAL NOT NULL DEFAULT 0,
                electricity_bill REAL NOT NULL DEFAULT 0,
                water_bill REAL NOT NULL DEFAULT 0,
                internet_bill REAL NOT NULL DEFAULT 0,
                other_expenses REAL NOT NULL DEFAULT 0,
                total_expense REAL NOT NULL DEFAULT 0,
                UNIQUE(year, month)
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a MonthlyExpense.
fn map_monthly_expense_row(row: &Row) -> Result<MonthlyExpense, rusqlite::Error> {
    let month: u8 = row.get(2)?;
    let month = Month::try_from(month)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(2, Type::Integer, error.into()))?;

    Ok(MonthlyExpense {
        id: row.get(0)?,
        period: Period {
            year: row.get(1)?,
            month,
        },
        date: row.get(3)?,
        staff_salary: row.get(4)?,
        night_guard_salary: row.get(5)?,
        electricity_bill: row.get(6)?,
        water_bill: row.get(7)?,
        internet_bill: row.get(8)?,
        other_expenses: row.get(9)?,
        total_expense: row.get(10)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
