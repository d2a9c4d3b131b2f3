//! Time resolution utilities.
//!
//! Pure functions for resolving a weekday set plus time-of-day pair to
//! the next concrete calendar occurrence, with overnight-wrap correction.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::error::{EngineError, EngineResult};

/// Parses a lowercase weekday name (e.g. "monday") into a [`Weekday`].
///
/// Matching is case-insensitive and also accepts the three-letter
/// abbreviations chrono understands.
///
/// # Errors
///
/// Returns [`EngineError::TimeParse`] for anything that is not a weekday
/// name; callers must not silently coerce.
///
/// # Example
///
/// ```
/// use care_shift_engine::scheduling::parse_weekday;
/// use chrono::Weekday;
///
/// assert_eq!(parse_weekday("wednesday").unwrap(), Weekday::Wed);
/// assert!(parse_weekday("someday").is_err());
/// ```
pub fn parse_weekday(value: &str) -> EngineResult<Weekday> {
    value.trim().parse::<Weekday>().map_err(|_| EngineError::TimeParse {
        value: value.to_string(),
    })
}

/// Returns the lowercase English name of a weekday, as used in
/// `recurring_pattern` tags and synthesized titles.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Parses an "HH:MM" time-of-day string.
///
/// # Errors
///
/// Returns [`EngineError::TimeParse`] for malformed input. Seconds are
/// not accepted; the wire format is exactly "HH:MM".
///
/// # Example
///
/// ```
/// use care_shift_engine::scheduling::parse_time_of_day;
/// use chrono::NaiveTime;
///
/// assert_eq!(
///     parse_time_of_day("22:00").unwrap(),
///     NaiveTime::from_hms_opt(22, 0, 0).unwrap()
/// );
/// assert!(parse_time_of_day("25:61").is_err());
/// ```
pub fn parse_time_of_day(value: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| EngineError::TimeParse {
        value: value.to_string(),
    })
}

/// Resolves the nearest future-or-today date whose weekday is in `days`.
///
/// Searches forward at most 7 days starting from `today` (a 0-day offset
/// is a valid answer). The defined fallback for an empty search is
/// `today + 7 days`, which cannot be reached for a non-empty set.
///
/// # Example
///
/// ```
/// use care_shift_engine::scheduling::next_occurrence;
/// use chrono::{NaiveDate, Weekday};
///
/// // 2026-01-14 is a Wednesday: a Wednesday-only set resolves to today.
/// let today = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// assert_eq!(next_occurrence(&[Weekday::Wed], today), today);
/// ```
pub fn next_occurrence(days: &[Weekday], today: NaiveDate) -> NaiveDate {
    for offset in 0..7 {
        let candidate = today + Duration::days(offset);
        if days.contains(&candidate.weekday()) {
            return candidate;
        }
    }
    today + Duration::days(7)
}

/// Combines a calendar date with a time of day into a timestamp.
pub fn combine(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Applies overnight-shift correction to an end timestamp.
///
/// When the naive same-day combination of the end time lands strictly
/// before the start, the window wraps past midnight and the end is
/// advanced by one calendar day. Equal timestamps are left alone and
/// describe a zero-length window.
///
/// # Example
///
/// ```
/// use care_shift_engine::scheduling::correct_overnight;
/// use chrono::NaiveDateTime;
///
/// let start = NaiveDateTime::parse_from_str("2026-01-12 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-01-12 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let corrected = correct_overnight(start, end);
/// assert_eq!(
///     corrected,
///     NaiveDateTime::parse_from_str("2026-01-13 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
/// );
/// ```
pub fn correct_overnight(start: NaiveDateTime, end: NaiveDateTime) -> NaiveDateTime {
    if end < start { end + Duration::days(1) } else { end }
}
