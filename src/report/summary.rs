//! Assembles the derived report for one month.
//!
//! Nothing here is persisted: a summary is recomputed from the month's
//! transactions and expense record on every request.

use serde::Serialize;

use crate::{
    asset::{AssetType, RentalType},
    expense::MonthlyExpense,
    report::aggregation::{
        balance, daily_cash, daily_income, daily_operational_expense, remaining_cash, total_cash,
        total_income, total_monthly_expense, total_operational_expense,
    },
    transaction::Transaction,
};

/// Car income split by rental mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RentalSplit {
    /// Income from per-trip (drop) rentals.
    pub drop: f64,
    /// Income from per-day (harian) rentals.
    pub harian: f64,
}

/// The derived figures for one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetSummary {
    /// The kind of asset.
    pub asset_type: AssetType,
    /// The specific asset the figures belong to.
    pub asset_name: String,
    /// Gross revenue booked against this asset.
    pub income: f64,
    /// Fuel and driver costs booked against this asset.
    pub operational_expense: f64,
    /// Daily cash accrued by this asset.
    pub cash: f64,
    /// Present for cars only: income split by rental mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_by_rental_type: Option<RentalSplit>,
}

/// The totals for one day of the month, for calendar drill-down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayTotals {
    /// The day of the month, 1-based.
    pub day: u8,
    /// Gross revenue on this day.
    pub income: f64,
    /// Fuel and driver costs on this day.
    pub operational_expense: f64,
    /// Daily cash accrued on this day.
    pub cash: f64,
}

/// The derived report for one month. Never persisted.
///
/// `total_income` and `total_cash` are exposed separately on purpose: the
/// headline income figure shown to operators is their sum, but some views
/// need only one component, so combining them is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Gross revenue across all transactions.
    pub total_income: f64,
    /// Fuel and driver costs across all transactions.
    pub total_operational_expense: f64,
    /// The period's fixed monthly expense, 0 when not entered.
    pub total_monthly_expense: f64,
    /// Daily cash accrued across all transactions.
    pub total_cash: f64,
    /// Income minus operational costs minus the monthly expense.
    pub balance: f64,
    /// The daily cash pool minus the monthly expense.
    pub remaining_cash: f64,
    /// Per-asset figures, in first-seen order.
    pub assets: Vec<AssetSummary>,
}

/// Derive the full summary for one month of transactions.
pub fn summarize(
    transactions: &[Transaction],
    expense: Option<&MonthlyExpense>,
) -> ReportSummary {
    ReportSummary {
        total_income: total_income(transactions, None, None),
        total_operational_expense: total_operational_expense(transactions, None),
        total_monthly_expense: total_monthly_expense(expense),
        total_cash: total_cash(transactions, None),
        balance: balance(transactions, expense),
        remaining_cash: remaining_cash(transactions, expense),
        assets: group_by_asset(transactions),
    }
}

/// Partition the transactions by `(asset_type, asset_name)` and total each
/// group, splitting car income further by rental mode.
pub fn group_by_asset(transactions: &[Transaction]) -> Vec<AssetSummary> {
    let mut groups: Vec<AssetSummary> = Vec::new();

    for transaction in transactions {
        let position = groups.iter().position(|group| {
            group.asset_type == transaction.asset_type
                && group.asset_name == transaction.asset_name
        });

        let group = match position {
            Some(position) => &mut groups[position],
            None => {
                groups.push(AssetSummary {
                    asset_type: transaction.asset_type,
                    asset_name: transaction.asset_name.clone(),
                    income: 0.0,
                    operational_expense: 0.0,
                    cash: 0.0,
                    income_by_rental_type: (transaction.asset_type == AssetType::Car)
                        .then_some(RentalSplit {
                            drop: 0.0,
                            harian: 0.0,
                        }),
                });
                groups.last_mut().unwrap()
            }
        };

        group.income += transaction.price;
        group.operational_expense += transaction.operational_cost();
        group.cash += transaction.daily_cash;

        if let Some(split) = &mut group.income_by_rental_type {
            match transaction.rental_type {
                Some(RentalType::Drop) => split.drop += transaction.price,
                Some(RentalType::Harian) => split.harian += transaction.price,
                None => {}
            }
        }
    }

    groups
}

/// The totals for every day of the month, 1 through `days_in_month`.
pub fn daily_breakdown(transactions: &[Transaction], days_in_month: u8) -> Vec<DayTotals> {
    (1..=days_in_month)
        .map(|day| DayTotals {
            day,
            income: daily_income(transactions, day, None, None),
            operational_expense: daily_operational_expense(transactions, day, None),
            cash: daily_cash(transactions, day, None),
        })
        .collect()
}
