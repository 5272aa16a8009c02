//! "3 days ago" style labels.
//!
//! The thresholds are walked from the largest unit down and the first one
//! the absolute difference reaches decides the unit. The quotient is rounded,
//! so e.g. 45 seconds reads as one minute and 400 days as one year.
//! Anything under 30 seconds is "just now".

use super::i18n::Locale;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTime {
    JustNow,
    /// Negative for the past, positive for the future.
    Offset { value: i64, unit: TimeUnit },
}

const SECOND: i64 = 1000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const YEAR: i64 = 365 * DAY;
const MONTH: i64 = YEAR / 12;
const FLOOR: i64 = 30 * SECOND;

// (threshold, divisor, unit)
const INTERVALS: [(i64, i64, TimeUnit); 7] = [
    (YEAR, YEAR, TimeUnit::Year),
    (MONTH, MONTH, TimeUnit::Month),
    (WEEK, WEEK, TimeUnit::Week),
    (DAY, DAY, TimeUnit::Day),
    (HOUR, HOUR, TimeUnit::Hour),
    (MINUTE, MINUTE, TimeUnit::Minute),
    (FLOOR, MINUTE, TimeUnit::Minute),
];

/// Buckets `diff_ms = now - event`.
pub fn classify(diff_ms: i64) -> RelativeTime {
    let abs = diff_ms.unsigned_abs();
    for (threshold, divisor, unit) in INTERVALS {
        if abs >= threshold as u64 {
            let magnitude = (abs as f64 / divisor as f64).round() as i64;
            let value = if diff_ms < 0 { magnitude } else { -magnitude };
            return RelativeTime::Offset { value, unit };
        }
    }
    RelativeTime::JustNow
}

pub fn format(relative: RelativeTime, locale: Locale) -> String {
    match relative {
        RelativeTime::JustNow => locale.messages().just_now.to_string(),
        RelativeTime::Offset { value, unit } => locale.format_relative(value, unit),
    }
}

pub fn from_now(event: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let diff = now.signed_duration_since(event).num_milliseconds();
    format(classify(diff), locale)
}
