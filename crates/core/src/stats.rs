//! Dashboard statistics arithmetic: reporting periods, growth rates,
//! percentage splits and monthly bucketing.

use chrono::{Datelike, Duration};

use crate::types::{Date, Timestamp};

// ---------------------------------------------------------------------------
// Reporting period
// ---------------------------------------------------------------------------

/// Reporting window for the detailed statistics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    /// Parse the `?period=` parameter. Anything unrecognised means a year.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("week") => Period::Week,
            Some("month") => Period::Month,
            Some("quarter") => Period::Quarter,
            _ => Period::Year,
        }
    }

    pub fn days(self) -> i64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Quarter => 90,
            Period::Year => 365,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
        }
    }

    /// The current window `[start, now)` and the previous window of the
    /// same length `[prev_start, start)`.
    pub fn windows(self, now: Timestamp) -> PeriodWindows {
        let len = Duration::days(self.days());
        let start = now - len;
        PeriodWindows {
            previous_start: start - len,
            start,
            end: now,
        }
    }
}

/// Boundaries of the current and previous reporting windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindows {
    pub previous_start: Timestamp,
    pub start: Timestamp,
    pub end: Timestamp,
}

// ---------------------------------------------------------------------------
// Ratios
// ---------------------------------------------------------------------------

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Growth of `current` over `previous`, in percent, rounded to one decimal.
///
/// With no previous activity, any current activity counts as 100 % growth.
pub fn growth_percent(current: i64, previous: i64) -> f64 {
    if previous > 0 {
        round1((current - previous) as f64 / previous as f64 * 100.0)
    } else if current > 0 {
        100.0
    } else {
        0.0
    }
}

/// `part` as a percentage of `total`, rounded to one decimal; 0 for an empty total.
pub fn percentage(part: i64, total: i64) -> f64 {
    if total > 0 {
        round1(part as f64 / total as f64 * 100.0)
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Monthly buckets
// ---------------------------------------------------------------------------

/// Number of monthly buckets in the time series.
pub const MONTHS_IN_SERIES: usize = 12;

/// First day of the month containing `date`.
pub fn month_start(date: Date) -> Date {
    date.with_day(1).unwrap_or(date)
}

/// First days of the last twelve calendar months, oldest first, ending with
/// the month containing `today`.
pub fn last_twelve_months(today: Date) -> Vec<Date> {
    let mut months = Vec::with_capacity(MONTHS_IN_SERIES);
    let mut cursor = month_start(today);
    for _ in 0..MONTHS_IN_SERIES {
        months.push(cursor);
        cursor = month_start(cursor - Duration::days(1));
    }
    months.reverse();
    months
}

/// `YYYY-MM` label of a month bucket.
pub fn month_label(month: Date) -> String {
    month.format("%Y-%m").to_string()
}

/// Look up the count for `month` in `(month_start, count)` rows; 0 when absent.
pub fn count_for_month(rows: &[(Date, i64)], month: Date) -> i64 {
    rows.iter()
        .find(|(m, _)| *m == month)
        .map(|(_, c)| *c)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Relative time
// ---------------------------------------------------------------------------

/// Short human description of how long ago `then` was.
pub fn time_ago(now: Timestamp, then: Timestamp) -> String {
    let elapsed = now - then;
    if elapsed.num_hours() < 1 {
        format!("{} min ago", elapsed.num_minutes().max(0))
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{} day(s) ago", elapsed.num_days())
    }
}
