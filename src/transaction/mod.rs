//! Transaction management for the bookkeeping application.
//!
//! This module contains everything related to income transactions:
//! - The `Transaction` model and the `TransactionEntry` classifier that
//!   validates entries and computes the daily cash accrual
//! - Database functions for storing and querying transactions
//! - The create and list endpoints

mod core;
mod create_endpoint;
mod entry;
mod list_endpoint;

pub use core::{
    DAILY_CASH_RATE, NewTransaction, Transaction, create_transaction, create_transaction_table,
    get_transactions_for_month,
};
pub use create_endpoint::create_transaction_endpoint;
pub use entry::TransactionEntry;
pub use list_endpoint::list_transactions_endpoint;
