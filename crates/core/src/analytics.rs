//! Calendar-month windows and metric pairs for analytics.
//!
//! All analytics compare the calendar month containing "now" against
//! the previous calendar month (not rolling 30-day windows). Windows
//! are half-open `[start, end)` so a timestamp belongs to exactly one
//! month.

use chrono::{Datelike, TimeZone, Utc};
use serde::Serialize;

use crate::types::Timestamp;

/// A metric for the current month together with its month-over-month
/// difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricPair {
    pub count: i64,
    pub difference: i64,
}

impl MetricPair {
    pub fn new(count: i64, previous: i64) -> Self {
        Self {
            count,
            difference: count - previous,
        }
    }
}

/// Half-open `[start, end)` calendar-month window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl MonthWindow {
    pub fn contains(&self, at: Timestamp) -> bool {
        self.start <= at && at < self.end
    }
}

/// The calendar month containing `now`.
pub fn month_window(now: Timestamp) -> MonthWindow {
    let start = start_of_month(now.year(), now.month());
    let (next_year, next_month) = roll_forward(now.year(), now.month());
    MonthWindow {
        start,
        end: start_of_month(next_year, next_month),
    }
}

/// The calendar month immediately before the one containing `now`.
pub fn previous_month_window(now: Timestamp) -> MonthWindow {
    let (prev_year, prev_month) = roll_back(now.year(), now.month());
    MonthWindow {
        start: start_of_month(prev_year, prev_month),
        end: start_of_month(now.year(), now.month()),
    }
}

fn start_of_month(year: i32, month: u32) -> Timestamp {
    // The first of any month at midnight is always a valid UTC instant.
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .expect("first of month is a valid timestamp")
}

fn roll_forward(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn roll_back(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}
