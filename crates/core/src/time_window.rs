//! Symbolic time windows (`today`, `week`, `month`) and their start instants.
//!
//! A window always ends at the injected `now`; [`resolve`] only computes its
//! inclusive lower bound. Calendar arithmetic is done in UTC.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Closed set of range selectors accepted by the listing endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Today,
    Week,
    #[default]
    Month,
}

impl TimeRange {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::Today => "today",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(TimeRange::Today),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            other => Err(format!(
                "Unknown time range '{other}'. Expected one of: today, week, month"
            )),
        }
    }
}

/// Inclusive start of the window of kind `range` that contains `now`.
///
/// - `Today` -> midnight of the current day
/// - `Week`  -> midnight of the most recent Sunday (weeks start on day 0),
///   clamped to the current day when that Sunday precedes the calendar minimum
/// - `Month` -> midnight of the first day of the current month
pub fn resolve(range: TimeRange, now: Timestamp) -> Timestamp {
    let today = now.date_naive();
    let start = match range {
        TimeRange::Today => today,
        TimeRange::Week => {
            let back = today.weekday().num_days_from_sunday();
            today
                .checked_sub_days(Days::new(u64::from(back)))
                .unwrap_or(today)
        }
        TimeRange::Month => start_of_month_date(today),
    };
    start.and_time(NaiveTime::MIN).and_utc()
}

/// Midnight on the first day of the month containing `now`.
pub fn start_of_month(now: Timestamp) -> Timestamp {
    resolve(TimeRange::Month, now)
}

fn start_of_month_date(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}
