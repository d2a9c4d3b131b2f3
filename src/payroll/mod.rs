//! Payroll computation for approved work logs.
//!
//! This module contains the day classification policy, the differential
//! rate calculator, and the approval workflow that ties a work log's
//! status transition to the creation of its payroll entry.

mod calculator;
mod classify;

pub use calculator::{approve_work_log, calculate_payroll};
pub use classify::{DayClass, classify_shift_hours};
