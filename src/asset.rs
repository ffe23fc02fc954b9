//! The fixed set of income-producing asset types and car rental modes.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

/// The kind of asset that produced a transaction.
///
/// The asset type decides which entry fields are meaningful and how the
/// daily cash accrual is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// A rental car, billed per trip (drop) or per day (harian).
    Car,
    /// A speedboat, billed per trip.
    Speedboat,
    /// The restaurant, which records daily cash sales only.
    Restaurant,
}

impl AssetType {
    /// The lowercase string form used in the database and the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Car => "car",
            AssetType::Speedboat => "speedboat",
            AssetType::Restaurant => "restaurant",
        }
    }
}

impl Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(AssetType::Car),
            "speedboat" => Ok(AssetType::Speedboat),
            "restaurant" => Ok(AssetType::Restaurant),
            other => Err(format!("unknown asset type \"{other}\"")),
        }
    }
}

impl ToSql for AssetType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for AssetType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: String| FromSqlError::Other(error.into()))
    }
}

/// How a car rental is billed.
///
/// Only meaningful when the asset type is [AssetType::Car].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalType {
    /// A one-way trip between two locations, billed per trip.
    Drop,
    /// A full-day rental, billed per day.
    Harian,
}

impl RentalType {
    /// The lowercase string form used in the database and the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalType::Drop => "drop",
            RentalType::Harian => "harian",
        }
    }
}

impl Display for RentalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RentalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop" => Ok(RentalType::Drop),
            "harian" => Ok(RentalType::Harian),
            other => Err(format!("unknown rental type \"{other}\"")),
        }
    }
}

impl ToSql for RentalType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for RentalType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: String| FromSqlError::Other(error.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::{AssetType, RentalType};

    #[test]
    fn asset_type_round_trips_through_strings() {
        let cases = [
            (AssetType::Car, "car"),
            (AssetType::Speedboat, "speedboat"),
            (AssetType::Restaurant, "restaurant"),
        ];

        for (asset_type, text) in cases {
            assert_eq!(asset_type.to_string(), text);
            assert_eq!(text.parse::<AssetType>(), Ok(asset_type));
        }
    }

    #[test]
    fn rental_type_round_trips_through_strings() {
        let cases = [(RentalType::Drop, "drop"), (RentalType::Harian, "harian")];

        for (rental_type, text) in cases {
            assert_eq!(rental_type.to_string(), text);
            assert_eq!(text.parse::<RentalType>(), Ok(rental_type));
        }
    }

    #[test]
    fn unknown_strings_are_rejected() {
        assert!("bus".parse::<AssetType>().is_err());
        assert!("weekly".parse::<RentalType>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&AssetType::Speedboat).unwrap(),
            "\"speedboat\""
        );
        assert_eq!(
            serde_json::from_str::<RentalType>("\"harian\"").unwrap(),
            RentalType::Harian
        );
    }
}
