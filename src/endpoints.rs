//! The API endpoint URIs.

/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to list a month's transactions.
pub const TRANSACTIONS_FOR_PERIOD: &str = "/api/transactions/{period}";
/// The route to get or upsert a month's expense record.
pub const EXPENSE_FOR_PERIOD: &str = "/api/expenses/{period}";
/// The route to derive a month's report.
pub const REPORT_FOR_PERIOD: &str = "/api/reports/{period}";
/// The route to list the selectable report periods.
pub const PERIODS: &str = "/api/periods";
