//! The `(year, month)` period key used to scope reports and monthly expenses.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month};

use crate::Error;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// A calendar month used as the aggregation scope and the monthly-expense
/// uniqueness key.
///
/// Parses from and displays as `YYYY-MM`, which is also its JSON form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    /// The calendar year.
    pub year: i32,
    /// The calendar month.
    pub month: Month,
}

impl Period {
    /// The period containing `date`.
    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The first day of the period.
    pub fn first_day(&self) -> Date {
        Date::from_calendar_date(self.year, self.month, 1).unwrap()
    }

    /// The last day of the period.
    pub fn last_day(&self) -> Date {
        Date::from_calendar_date(self.year, self.month, self.days_in_month()).unwrap()
    }

    /// The number of days in the period, 28 through 31.
    pub fn days_in_month(&self) -> u8 {
        time::util::days_in_month(self.month, self.year)
    }

    /// A human-readable label such as "August 2025".
    pub fn label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month as u8)
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPeriod(s.to_owned());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        Ok(Self { year, month })
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Enumerate the selectable report periods as of `today`.
///
/// Spans the current and the immediately preceding calendar year, excluding
/// months after the current month: the current year's months come first in
/// ascending order, then all twelve months of the previous year.
///
/// A pure calendar computation, independent of any stored data. `today` is
/// passed explicitly so callers control the clock.
pub fn month_options(today: Date) -> Vec<Period> {
    let current_year = today.year();
    let current_month = today.month() as u8;

    let mut options = Vec::with_capacity(12 + current_month as usize);

    for month in &MONTHS[..current_month as usize] {
        options.push(Period {
            year: current_year,
            month: *month,
        });
    }

    for month in MONTHS {
        options.push(Period {
            year: current_year - 1,
            month,
        });
    }

    options
}
