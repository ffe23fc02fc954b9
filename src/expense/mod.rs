//! Monthly fixed-expense management for the bookkeeping application.
//!
//! One record per calendar month, upserted in place: the six component
//! fields and their recomputed total, plus the get/upsert endpoints.

mod core;
mod get_endpoint;
mod upsert_endpoint;

pub use core::{
    MonthlyExpense, MonthlyExpenseInput, create_monthly_expense_table, get_monthly_expense,
    upsert_monthly_expense,
};
pub use get_endpoint::get_expense_endpoint;
pub use upsert_endpoint::upsert_expense_endpoint;
