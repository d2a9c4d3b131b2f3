//! Holiday calendar model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A calendar date carrying a pay-rate multiplier for work performed on it.
///
/// Holiday classification takes precedence over weekend classification in
/// the payroll calculator.
///
/// # Example
///
/// ```
/// use care_shift_engine::models::Holiday;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2026, 12, 25).unwrap(),
///     name: "Christmas Day".to_string(),
///     multiplier: Decimal::new(20, 1), // 2.0
/// };
/// assert!(holiday.multiplier >= Decimal::ONE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The calendar date of the holiday.
    pub date: NaiveDate,
    /// Display name (e.g. "Christmas Day").
    pub name: String,
    /// Pay multiplier (>= 1.0) applied to the regular rate.
    pub multiplier: Decimal,
}
