//! Pure aggregation rules over one month of transactions.
//!
//! Every function here is a deterministic computation over the slice it is
//! given: no storage access, no shared state, recomputed from scratch on
//! every call. The month has already been selected by the caller; day
//! filters match on day-of-month only.

use crate::{asset::AssetType, expense::MonthlyExpense, transaction::Transaction};

fn matches_type(transaction: &Transaction, asset_type: Option<AssetType>) -> bool {
    asset_type.is_none_or(|wanted| transaction.asset_type == wanted)
}

fn matches_name(transaction: &Transaction, asset_name: Option<&str>) -> bool {
    asset_name.is_none_or(|wanted| transaction.asset_name == wanted)
}

/// Sum of `price` over the transactions, optionally filtered by asset type
/// and name.
///
/// Restaurant transactions always contribute 0 here: their revenue is
/// carried by the daily cash pool instead. Callers that want the headline
/// income figure add [total_cash] themselves; the two are never
/// pre-combined.
pub fn total_income(
    transactions: &[Transaction],
    asset_type: Option<AssetType>,
    asset_name: Option<&str>,
) -> f64 {
    transactions
        .iter()
        .filter(|t| matches_type(t, asset_type) && matches_name(t, asset_name))
        .map(|t| t.price)
        .sum()
}

/// Sum of fuel and driver costs over the transactions, optionally filtered
/// by asset name.
pub fn total_operational_expense(transactions: &[Transaction], asset_name: Option<&str>) -> f64 {
    transactions
        .iter()
        .filter(|t| matches_name(t, asset_name))
        .map(Transaction::operational_cost)
        .sum()
}

/// Sum of the daily cash accruals over the transactions, optionally
/// filtered by asset type.
pub fn total_cash(transactions: &[Transaction], asset_type: Option<AssetType>) -> f64 {
    transactions
        .iter()
        .filter(|t| matches_type(t, asset_type))
        .map(|t| t.daily_cash)
        .sum()
}

/// The period's fixed monthly expense, or 0 when none has been entered.
pub fn total_monthly_expense(expense: Option<&MonthlyExpense>) -> f64 {
    expense.map_or(0.0, |expense| expense.total_expense)
}

/// Income minus operational costs minus the fixed monthly expense.
///
/// Daily cash is deliberately not part of this figure; it has its own
/// running balance in [remaining_cash]. May go negative and is surfaced
/// as-is.
pub fn balance(transactions: &[Transaction], expense: Option<&MonthlyExpense>) -> f64 {
    total_income(transactions, None, None)
        - total_operational_expense(transactions, None)
        - total_monthly_expense(expense)
}

/// The daily cash pool minus the fixed monthly expense.
///
/// Operational costs never touch this pool. May go negative and is
/// surfaced as-is; warning the operator is a caller concern.
pub fn remaining_cash(transactions: &[Transaction], expense: Option<&MonthlyExpense>) -> f64 {
    total_cash(transactions, None) - total_monthly_expense(expense)
}

/// Sum of `price` for transactions on the given day of the month,
/// optionally filtered by asset type and name.
pub fn daily_income(
    transactions: &[Transaction],
    day: u8,
    asset_type: Option<AssetType>,
    asset_name: Option<&str>,
) -> f64 {
    transactions
        .iter()
        .filter(|t| t.date.day() == day && matches_type(t, asset_type) && matches_name(t, asset_name))
        .map(|t| t.price)
        .sum()
}

/// Sum of fuel and driver costs for transactions on the given day of the
/// month, optionally filtered by asset name.
pub fn daily_operational_expense(
    transactions: &[Transaction],
    day: u8,
    asset_name: Option<&str>,
) -> f64 {
    transactions
        .iter()
        .filter(|t| t.date.day() == day && matches_name(t, asset_name))
        .map(Transaction::operational_cost)
        .sum()
}

/// Sum of the daily cash accruals for transactions on the given day of the
/// month, optionally filtered by asset type.
pub fn daily_cash(transactions: &[Transaction], day: u8, asset_type: Option<AssetType>) -> f64 {
    transactions
        .iter()
        .filter(|t| t.date.day() == day && matches_type(t, asset_type))
        .map(|t| t.daily_cash)
        .sum()
}

/// The distinct asset names of the given type, in first-seen order.
pub fn asset_names(transactions: &[Transaction], asset_type: AssetType) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for transaction in transactions {
        if transaction.asset_type == asset_type && !names.contains(&transaction.asset_name) {
            names.push(transaction.asset_name.clone());
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        asset::{AssetType, RentalType},
        expense::MonthlyExpense,
        transaction::Transaction,
    };

    use super::{
        asset_names, balance, daily_cash, daily_income, daily_operational_expense,
        remaining_cash, total_cash, total_income, total_monthly_expense,
        total_operational_expense,
    };

    fn car_drop(
        id: i64,
        date: Date,
        price: f64,
        fuel_cost: f64,
        driver_cost: f64,
        trips: u32,
    ) -> Transaction {
        Transaction {
            id,
            date,
            asset_type: AssetType::Car,
            asset_name: "Veloz 2021 DR 1359 DT".to_owned(),
            rental_type: Some(RentalType::Drop),
            price,
            fuel_cost,
            driver_cost,
            trips,
            days: 1,
            daily_cash: f64::from(trips) * 10_000.0,
            route: Some("Mataram - Senggigi".to_owned()),
        }
    }

    fn restaurant(id: i64, date: Date, sales: f64) -> Transaction {
        Transaction {
            id,
            date,
            asset_type: AssetType::Restaurant,
            asset_name: "Resto".to_owned(),
            rental_type: None,
            price: 0.0,
            fuel_cost: 0.0,
            driver_cost: 0.0,
            trips: 1,
            days: 1,
            daily_cash: sales,
            route: None,
        }
    }

    fn expense_of(total: f64) -> MonthlyExpense {
        MonthlyExpense {
            id: 1,
            period: "2025-08".parse().unwrap(),
            date: date!(2025 - 08 - 01),
            staff_salary: 0.0,
            night_guard_salary: 0.0,
            electricity_bill: total,
            water_bill: 0.0,
            internet_bill: 0.0,
            other_expenses: 0.0,
            total_expense: total,
        }
    }

    #[test]
    fn empty_inputs_yield_zero_everywhere() {
        let transactions: Vec<Transaction> = vec![];

        assert_eq!(total_income(&transactions, None, None), 0.0);
        assert_eq!(total_operational_expense(&transactions, None), 0.0);
        assert_eq!(total_cash(&transactions, None), 0.0);
        assert_eq!(total_monthly_expense(None), 0.0);
        assert_eq!(balance(&transactions, None), 0.0);
        assert_eq!(remaining_cash(&transactions, None), 0.0);
        assert_eq!(daily_income(&transactions, 15, None, None), 0.0);
    }

    #[test]
    fn car_drop_contributes_price_costs_and_per_trip_cash() {
        let transactions = vec![car_drop(
            1,
            date!(2025 - 08 - 05),
            300_000.0,
            20_000.0,
            15_000.0,
            3,
        )];

        assert_eq!(total_income(&transactions, None, None), 300_000.0);
        assert_eq!(total_operational_expense(&transactions, None), 35_000.0);
        assert_eq!(total_cash(&transactions, None), 30_000.0);
    }

    #[test]
    fn restaurant_revenue_rides_in_cash_not_income() {
        let transactions = vec![restaurant(1, date!(2025 - 08 - 10), 150_000.0)];

        assert_eq!(total_income(&transactions, None, None), 0.0);
        assert_eq!(total_cash(&transactions, None), 150_000.0);
        assert_eq!(
            total_cash(&transactions, Some(AssetType::Restaurant)),
            150_000.0
        );
    }

    #[test]
    fn balance_ignores_daily_cash() {
        let mut transactions = vec![car_drop(
            1,
            date!(2025 - 08 - 05),
            300_000.0,
            20_000.0,
            15_000.0,
            3,
        )];
        let before = balance(&transactions, None);

        // A pure daily-cash contribution must leave the balance untouched.
        transactions.push(restaurant(2, date!(2025 - 08 - 06), 150_000.0));

        assert_eq!(balance(&transactions, None), before);
        assert_eq!(before, 300_000.0 - 35_000.0);
    }

    #[test]
    fn remaining_cash_ignores_operational_costs() {
        let cheap_fuel = vec![car_drop(
            1,
            date!(2025 - 08 - 05),
            300_000.0,
            20_000.0,
            15_000.0,
            3,
        )];
        let pricey_fuel = vec![car_drop(
            1,
            date!(2025 - 08 - 05),
            300_000.0,
            90_000.0,
            15_000.0,
            3,
        )];

        assert_eq!(
            remaining_cash(&cheap_fuel, None),
            remaining_cash(&pricey_fuel, None)
        );
        assert_ne!(balance(&cheap_fuel, None), balance(&pricey_fuel, None));
    }

    #[test]
    fn more_trips_move_cash_but_not_balance() {
        let two_trips = vec![car_drop(1, date!(2025 - 08 - 05), 300_000.0, 0.0, 0.0, 2)];
        let five_trips = vec![car_drop(1, date!(2025 - 08 - 05), 300_000.0, 0.0, 0.0, 5)];

        assert_eq!(balance(&two_trips, None), balance(&five_trips, None));
        assert_eq!(
            remaining_cash(&five_trips, None) - remaining_cash(&two_trips, None),
            30_000.0
        );
    }

    #[test]
    fn remaining_cash_goes_negative_without_clamping() {
        let transactions = vec![restaurant(1, date!(2025 - 08 - 10), 150_000.0)];
        let expense = expense_of(500_000.0);

        assert_eq!(remaining_cash(&transactions, Some(&expense)), -350_000.0);
    }

    #[test]
    fn day_filters_match_day_of_month_only() {
        let transactions = vec![
            car_drop(1, date!(2025 - 08 - 05), 300_000.0, 20_000.0, 0.0, 1),
            car_drop(2, date!(2025 - 08 - 15), 200_000.0, 10_000.0, 0.0, 1),
            restaurant(3, date!(2025 - 08 - 05), 80_000.0),
        ];

        assert_eq!(daily_income(&transactions, 5, None, None), 300_000.0);
        assert_eq!(
            daily_income(&transactions, 5, Some(AssetType::Restaurant), None),
            0.0
        );
        assert_eq!(daily_operational_expense(&transactions, 15, None), 10_000.0);
        assert_eq!(daily_cash(&transactions, 5, None), 90_000.0);
        assert_eq!(
            daily_cash(&transactions, 5, Some(AssetType::Restaurant)),
            80_000.0
        );
        assert_eq!(daily_cash(&transactions, 20, None), 0.0);
    }

    #[test]
    fn filters_narrow_by_type_and_name() {
        let mut speedboat = restaurant(2, date!(2025 - 08 - 06), 20_000.0);
        speedboat.asset_type = AssetType::Speedboat;
        speedboat.asset_name = "Speed Boat BJT 01".to_owned();
        speedboat.price = 500_000.0;
        let transactions = vec![
            car_drop(1, date!(2025 - 08 - 05), 300_000.0, 20_000.0, 15_000.0, 3),
            speedboat,
        ];

        assert_eq!(
            total_income(&transactions, Some(AssetType::Car), None),
            300_000.0
        );
        assert_eq!(
            total_income(&transactions, None, Some("Speed Boat BJT 01")),
            500_000.0
        );
        assert_eq!(
            total_operational_expense(&transactions, Some("Speed Boat BJT 01")),
            0.0
        );
    }

    #[test]
    fn asset_names_are_unique_in_first_seen_order() {
        let mut second_car = car_drop(2, date!(2025 - 08 - 06), 250_000.0, 0.0, 0.0, 1);
        second_car.asset_name = "Avanza 2023 D 1217 UBM".to_owned();
        let transactions = vec![
            car_drop(1, date!(2025 - 08 - 05), 300_000.0, 0.0, 0.0, 1),
            second_car,
            car_drop(3, date!(2025 - 08 - 07), 280_000.0, 0.0, 0.0, 1),
        ];

        assert_eq!(
            asset_names(&transactions, AssetType::Car),
            vec![
                "Veloz 2021 DR 1359 DT".to_owned(),
                "Avanza 2023 D 1217 UBM".to_owned()
            ]
        );
        assert_eq!(asset_names(&transactions, AssetType::Speedboat), Vec::<String>::new());
    }
}
