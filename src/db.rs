//! Database schema initialization.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error, expense::create_monthly_expense_table, transaction::create_transaction_table,
};

/// Create the tables for the domain models if they do not already exist.
///
/// Runs inside an exclusive transaction so that concurrent server start-ups
/// cannot interleave schema creation.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;
    create_monthly_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
