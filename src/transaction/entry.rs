//! The typed entry boundary for new transactions.
//!
//! [TransactionEntry] accepts whatever the entry form sends; its
//! [classify](TransactionEntry::classify) method is the single place that
//! decides which fields the chosen asset/rental combination requires and
//! how the daily cash accrual is computed. Nothing downstream of it ever
//! sees a partially filled transaction.

use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    asset::{AssetType, RentalType},
    transaction::core::{DAILY_CASH_RATE, NewTransaction},
};

/// The raw input for one transaction, as submitted by the entry form.
///
/// Every per-asset field is optional at this level. Blank monetary fields
/// coerce to 0; blank trip/day counts under car rentals default to 1; an
/// explicit count of 0 is rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionEntry {
    /// The calendar day the transaction happened on.
    pub date: Date,
    /// The kind of asset that produced the income.
    pub asset_type: AssetType,
    /// How a car rental is billed. Required for cars, ignored otherwise.
    #[serde(default)]
    pub rental_type: Option<RentalType>,
    /// The vehicle or boat the income came from.
    #[serde(default)]
    pub vehicle: Option<String>,
    /// Where a drop rental started.
    #[serde(default)]
    pub from_location: Option<String>,
    /// Where a drop rental ended.
    #[serde(default)]
    pub to_location: Option<String>,
    /// Gross revenue. Required for cars and speedboats.
    #[serde(default)]
    pub price: Option<f64>,
    /// Fuel cost for the transaction.
    #[serde(default)]
    pub fuel_cost: Option<f64>,
    /// Driver wages for the transaction.
    #[serde(default)]
    pub driver_cost: Option<f64>,
    /// Trip count for drop rentals and speedboat trips.
    #[serde(default)]
    pub trips: Option<u32>,
    /// Day count for harian rentals.
    #[serde(default)]
    pub days: Option<u32>,
    /// The day's cash sales. Required for the restaurant.
    #[serde(default)]
    pub sales_amount: Option<f64>,
}

impl TransactionEntry {
    /// Validate the entry against the rules for its asset type and produce
    /// a well-formed [NewTransaction].
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingFields] naming every field the asset/rental
    ///   combination requires but the entry omitted,
    /// - or [Error::InvalidCount] if a trip or day count of 0 was supplied,
    /// - or [Error::NegativeAmount] if the restaurant cash sales are
    ///   negative.
    pub fn classify(self) -> Result<NewTransaction, Error> {
        match self.asset_type {
            AssetType::Car => self.classify_car(),
            AssetType::Speedboat => self.classify_speedboat(),
            AssetType::Restaurant => self.classify_restaurant(),
        }
    }

    fn classify_car(self) -> Result<NewTransaction, Error> {
        let mut missing = Vec::new();

        let vehicle = non_blank(self.vehicle.as_deref());
        if vehicle.is_none() {
            missing.push("vehicle");
        }

        if self.price.is_none() {
            missing.push("price");
        }

        let Some(rental_type) = self.rental_type else {
            missing.push("rental_type");
            return Err(Error::MissingFields(missing));
        };

        match rental_type {
            RentalType::Drop => {
                let from_location = non_blank(self.from_location.as_deref());
                let to_location = non_blank(self.to_location.as_deref());
                if from_location.is_none() {
                    missing.push("from_location");
                }
                if to_location.is_none() {
                    missing.push("to_location");
                }
                if !missing.is_empty() {
                    return Err(Error::MissingFields(missing));
                }

                let trips = count_or_default(self.trips, "trips")?;
                let route = format!("{} - {}", from_location.unwrap(), to_location.unwrap());

                Ok(NewTransaction {
                    date: self.date,
                    asset_type: AssetType::Car,
                    asset_name: vehicle.unwrap().to_owned(),
                    rental_type: Some(RentalType::Drop),
                    price: self.price.unwrap(),
                    fuel_cost: self.fuel_cost.unwrap_or(0.0),
                    driver_cost: self.driver_cost.unwrap_or(0.0),
                    trips,
                    days: 1,
                    daily_cash: f64::from(trips) * DAILY_CASH_RATE,
                    route: Some(route),
                })
            }
            RentalType::Harian => {
                if !missing.is_empty() {
                    return Err(Error::MissingFields(missing));
                }

                let days = count_or_default(self.days, "days")?;

                Ok(NewTransaction {
                    date: self.date,
                    asset_type: AssetType::Car,
                    asset_name: vehicle.unwrap().to_owned(),
                    rental_type: Some(RentalType::Harian),
                    price: self.price.unwrap(),
                    // Operational costs are tracked per trip, so harian
                    // rentals carry none.
                    fuel_cost: 0.0,
                    driver_cost: 0.0,
                    trips: 1,
                    days,
                    daily_cash: f64::from(days) * DAILY_CASH_RATE,
                    route: None,
                })
            }
        }
    }

    fn classify_speedboat(self) -> Result<NewTransaction, Error> {
        let mut missing = Vec::new();

        let vehicle = non_blank(self.vehicle.as_deref());
        if vehicle.is_none() {
            missing.push("vehicle");
        }
        if self.trips.is_none() {
            missing.push("trips");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        if !missing.is_empty() {
            return Err(Error::MissingFields(missing));
        }

        let trips = count_or_default(self.trips, "trips")?;

        Ok(NewTransaction {
            date: self.date,
            asset_type: AssetType::Speedboat,
            asset_name: vehicle.unwrap().to_owned(),
            rental_type: None,
            price: self.price.unwrap(),
            fuel_cost: self.fuel_cost.unwrap_or(0.0),
            driver_cost: self.driver_cost.unwrap_or(0.0),
            trips,
            days: 1,
            daily_cash: f64::from(trips) * DAILY_CASH_RATE,
            route: None,
        })
    }

    fn classify_restaurant(self) -> Result<NewTransaction, Error> {
        let Some(sales_amount) = self.sales_amount else {
            return Err(Error::MissingFields(vec!["sales_amount"]));
        };

        if sales_amount < 0.0 {
            return Err(Error::NegativeAmount("sales_amount"));
        }

        Ok(NewTransaction {
            date: self.date,
            asset_type: AssetType::Restaurant,
            asset_name: "Resto".to_owned(),
            rental_type: None,
            // Restaurant revenue is carried by daily_cash alone.
            price: 0.0,
            fuel_cost: 0.0,
            driver_cost: 0.0,
            trips: 1,
            days: 1,
            daily_cash: sales_amount,
            route: None,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn count_or_default(value: Option<u32>, field: &'static str) -> Result<u32, Error> {
    match value {
        None => Ok(1),
        Some(0) => Err(Error::InvalidCount(field)),
        Some(count) => Ok(count),
    }
}
