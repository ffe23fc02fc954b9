//! Defines the endpoint that lists the selectable report periods.
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;

use crate::period::{Period, month_options};

/// One selectable period, with a label for display.
#[derive(Debug, Serialize)]
pub struct PeriodOption {
    /// The period in `YYYY-MM` form.
    pub value: Period,
    /// A human-readable label such as "August 2025".
    pub label: String,
}

/// A route handler that lists the selectable report periods.
///
/// Spans the current and previous calendar year, excluding future months.
/// Purely a calendar computation; no stored data is consulted.
pub async fn list_periods_endpoint() -> Json<Vec<PeriodOption>> {
    let today = OffsetDateTime::now_utc().date();

    Json(
        month_options(today)
            .into_iter()
            .map(|period| PeriodOption {
                label: period.label(),
                value: period,
            })
            .collect(),
    )
}
