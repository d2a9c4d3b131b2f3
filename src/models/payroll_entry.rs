//! Payroll entry model.
//!
//! A payroll entry is the computed payable result for exactly one approved
//! work log. Entries are created once, never deleted, and their payment
//! status only advances.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment state of a payroll entry. Advances pending -> approved -> paid
/// and never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Computed, awaiting payment approval.
    Pending,
    /// Cleared for payment.
    Approved,
    /// Paid out; the entry is immutable from here on.
    Paid,
}

/// The computed, payable result for one approved work log.
///
/// Exactly one of `regular_hours`, `overtime_hours` and `holiday_hours`
/// is non-zero: the whole log lands in a single bucket decided by its
/// start date (holiday, weekend, or regular weekday).
///
/// Invariant: `total_amount = hours x applicable rate + expense_total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The approved work log this entry pays for.
    pub work_log_id: Uuid,
    /// The team membership being paid.
    pub team_member_id: Uuid,
    /// The care plan the work was performed under.
    pub care_plan_id: Uuid,
    /// Hours paid at the regular rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate (weekend work).
    pub overtime_hours: Decimal,
    /// Hours paid at the holiday rate, when the log fell on a holiday.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_hours: Option<Decimal>,
    /// The regular hourly rate in effect.
    pub regular_rate: Decimal,
    /// The overtime hourly rate in effect.
    pub overtime_rate: Decimal,
    /// The holiday hourly rate, when the log fell on a holiday.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_rate: Option<Decimal>,
    /// Sum of approved expenses; omitted entirely when zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_total: Option<Decimal>,
    /// Hours times rate plus expenses.
    pub total_amount: Decimal,
    /// Payment state.
    pub payment_status: PaymentStatus,
    /// Date the entry was paid, once it has been.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Start of the period being paid (the work log's start).
    pub pay_period_start: NaiveDateTime,
    /// End of the period being paid (the work log's end).
    pub pay_period_end: NaiveDateTime,
}
