//! Day classification policy for payroll bucketing.
//!
//! A work log's hours land entirely in one pay bucket, decided by the
//! calendar date the log starts on. This all-hours-in-one-bucket rule is a
//! deliberate simplification of real overtime computation: a log is never
//! split mid-shift into partial regular and overtime hours. The policy is
//! isolated here so a multi-bucket implementation can replace it without
//! touching the rest of the calculator.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::models::Holiday;

/// The pay classification of a work date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayClass {
    /// The date matches a holiday calendar entry; all hours are paid at
    /// the regular rate times the holiday multiplier.
    Holiday {
        /// The matched holiday's pay multiplier.
        multiplier: Decimal,
    },
    /// Saturday or Sunday; all hours are paid at the overtime rate.
    Weekend,
    /// An ordinary weekday; all hours are paid at the regular rate.
    Regular,
}

/// Classifies a work date for payroll bucketing.
///
/// Holiday classification takes precedence over weekend: Christmas on a
/// Saturday is a holiday, not a weekend.
///
/// # Example
///
/// ```
/// use care_shift_engine::payroll::{DayClass, classify_shift_hours};
/// use care_shift_engine::models::Holiday;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // 2026-01-17 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
/// assert_eq!(classify_shift_hours(saturday, &[]), DayClass::Weekend);
///
/// let holidays = [Holiday {
///     date: saturday,
///     name: "Foundation Day".to_string(),
///     multiplier: Decimal::new(20, 1),
/// }];
/// assert!(matches!(
///     classify_shift_hours(saturday, &holidays),
///     DayClass::Holiday { .. }
/// ));
/// ```
pub fn classify_shift_hours(date: NaiveDate, holidays: &[Holiday]) -> DayClass {
    if let Some(holiday) = holidays.iter().find(|h| h.date == date) {
        return DayClass::Holiday {
            multiplier: holiday.multiplier,
        };
    }
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayClass::Weekend,
        _ => DayClass::Regular,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn holiday(date: &str, multiplier: &str) -> Holiday {
        Holiday {
            date: make_date(date),
            name: "Test Day".to_string(),
            multiplier: Decimal::from_str(multiplier).unwrap(),
        }
    }

    #[test]
    fn test_monday_is_regular() {
        // 2026-01-12 is a Monday
        assert_eq!(classify_shift_hours(make_date("2026-01-12"), &[]), DayClass::Regular);
    }

    #[test]
    fn test_friday_is_regular() {
        // 2026-01-16 is a Friday
        assert_eq!(classify_shift_hours(make_date("2026-01-16"), &[]), DayClass::Regular);
    }

    #[test]
    fn test_saturday_is_weekend() {
        // 2026-01-17 is a Saturday
        assert_eq!(classify_shift_hours(make_date("2026-01-17"), &[]), DayClass::Weekend);
    }

    #[test]
    fn test_sunday_is_weekend() {
        // 2026-01-18 is a Sunday
        assert_eq!(classify_shift_hours(make_date("2026-01-18"), &[]), DayClass::Weekend);
    }

    #[test]
    fn test_holiday_matches_exact_date() {
        let holidays = [holiday("2026-01-12", "1.5")];
        assert_eq!(
            classify_shift_hours(make_date("2026-01-12"), &holidays),
            DayClass::Holiday {
                multiplier: Decimal::from_str("1.5").unwrap()
            }
        );
        assert_eq!(
            classify_shift_hours(make_date("2026-01-13"), &holidays),
            DayClass::Regular
        );
    }

    #[test]
    fn test_holiday_takes_precedence_over_weekend() {
        // 2026-01-17 is a Saturday and also a listed holiday
        let holidays = [holiday("2026-01-17", "2.0")];
        assert_eq!(
            classify_shift_hours(make_date("2026-01-17"), &holidays),
            DayClass::Holiday {
                multiplier: Decimal::from_str("2.0").unwrap()
            }
        );
    }
}
