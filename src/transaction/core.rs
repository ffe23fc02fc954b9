//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    asset::{AssetType, RentalType},
    period::Period,
};

/// The fixed daily cash accrual per unit event (trip or day), in rupiah.
pub const DAILY_CASH_RATE: f64 = 10_000.0;

// ============================================================================
// MODELS
// ============================================================================

/// One income-producing event: a car rental, a speedboat trip, or a day of
/// restaurant cash sales.
///
/// To create a new `Transaction`, classify a [crate::TransactionEntry] and
/// insert the result with [create_transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction. Assigned on insert, immutable.
    pub id: i64,
    /// The calendar day the transaction happened on, the period key for
    /// aggregation.
    pub date: Date,
    /// The kind of asset that produced the income.
    pub asset_type: AssetType,
    /// The specific asset: vehicle name and plate, boat name, or "Resto".
    pub asset_name: String,
    /// How a car rental was billed. `None` for other asset types.
    pub rental_type: Option<RentalType>,
    /// Gross revenue for this transaction. Always 0 for the restaurant,
    /// whose revenue is carried by `daily_cash` instead.
    pub price: f64,
    /// Fuel spent operating the asset for this transaction.
    pub fuel_cost: f64,
    /// Driver wages for this transaction.
    pub driver_cost: f64,
    /// How many trips the transaction covers. Used under drop rentals and
    /// speedboat trips.
    pub trips: u32,
    /// How many days the transaction covers. Used under harian rentals.
    pub days: u32,
    /// The fixed operating-cash accrual computed at entry time. Derived
    /// from the asset/rental type and counts, never edited afterwards.
    pub daily_cash: f64,
    /// A "from - to" descriptor for car drop rentals.
    pub route: Option<String>,
}

impl Transaction {
    /// The combined operational cost (fuel plus driver) of this transaction.
    pub fn operational_cost(&self) -> f64 {
        self.fuel_cost + self.driver_cost
    }
}

/// A fully validated transaction payload, ready to insert.
///
/// Produced only by [crate::TransactionEntry::classify], which enforces the
/// per-asset field requirements and computes `daily_cash`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The calendar day the transaction happened on.
    pub date: Date,
    /// The kind of asset that produced the income.
    pub asset_type: AssetType,
    /// The specific asset the income came from.
    pub asset_name: String,
    /// How a car rental was billed. `None` for other asset types.
    pub rental_type: Option<RentalType>,
    /// Gross revenue for this transaction.
    pub price: f64,
    /// Fuel spent operating the asset.
    pub fuel_cost: f64,
    /// Driver wages.
    pub driver_cost: f64,
    /// How many trips the transaction covers.
    pub trips: u32,
    /// How many days the transaction covers.
    pub days: u32,
    /// The fixed operating-cash accrual computed at entry time.
    pub daily_cash: f64,
    /// A "from - to" descriptor for car drop rentals.
    pub route: Option<String>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a validated payload.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\"
             (date, asset_type, asset_name, rental_type, price, fuel_cost, driver_cost,
              trips, days, daily_cash, route)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             RETURNING id, date, asset_type, asset_name, rental_type, price, fuel_cost,
                       driver_cost, trips, days, daily_cash, route",
        )?
        .query_row(
            (
                new_transaction.date,
                new_transaction.asset_type,
                &new_transaction.asset_name,
                new_transaction.rental_type,
                new_transaction.price,
                new_transaction.fuel_cost,
                new_transaction.driver_cost,
                new_transaction.trips,
                new_transaction.days,
                new_transaction.daily_cash,
                &new_transaction.route,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve all transactions whose date falls within the given period.
///
/// Rows are returned in date order for convenience; callers must not rely
/// on any finer ordering.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_for_month(
    period: Period,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, date, asset_type, asset_name, rental_type, price, fuel_cost,
                    driver_cost, trips, days, daily_cash, route
             FROM \"transaction\"
             WHERE date BETWEEN :first_day AND :last_day
             ORDER BY date",
        )?
        .query_map(
            &[
                (":first_day", &period.first_day()),
                (":last_day", &period.last_day()),
            ],
            map_transaction_row,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                asset_type TEXT NOT NULL,
                asset_name TEXT NOT NULL,
                rental_type TEXT,
                price REAL NOT NULL,
                fuel_cost REAL NOT NULL DEFAULT 0,
                driver_cost REAL NOT NULL DEFAULT 0,
                trips INTEGER NOT NULL DEFAULT 1,
                days INTEGER NOT NULL DEFAULT 1,
                daily_cash REAL NOT NULL,
                route TEXT
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // The report page always queries by month.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        date: row.get(1)?,
        asset_type: row.get(2)?,
        asset_name: row.get(3)?,
        rental_type: row.get(4)?,
        price: row.get(5)?,
        fuel_cost: row.get(6)?,
        driver_cost: row.get(7)?,
        trips: row.get(8)?,
        days: row.get(9)?,
        daily_cash: row.get(10)?,
        route: row.get(11)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
