//! Monthly report derivation for the bookkeeping application.
//!
//! The aggregation rules are pure functions over one month of transactions
//! plus the period's expense record; the endpoints fetch a consistent
//! snapshot and re-derive everything per request.

mod aggregation;
mod periods_endpoint;
mod report_endpoint;
mod summary;

pub use aggregation::{
    asset_names, balance, daily_cash, daily_income, daily_operational_expense, remaining_cash,
    total_cash, total_income, total_monthly_expense, total_operational_expense,
};
pub use periods_endpoint::list_periods_endpoint;
pub use report_endpoint::get_report_endpoint;
pub use summary::{
    AssetSummary, DayTotals, RentalSplit, ReportSummary, daily_breakdown, group_by_asset,
    summarize,
};
