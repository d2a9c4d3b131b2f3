//! Differential payroll calculation.
//!
//! Turns one approved work log plus its approved expenses and the
//! caregiver's rate record into a single payroll entry, and drives the
//! approve-work-log workflow that must observe the status flip and the
//! entry creation as one unit.

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::config::PayrollDefaults;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CareTeamMember, ExpenseStatus, Holiday, PaymentStatus, PayrollEntry, WorkLog, WorkLogExpense,
    WorkLogStatus,
};
use crate::payroll::classify::{DayClass, classify_shift_hours};
use crate::store::EngineStore;

/// Computes the payroll entry for a work log.
///
/// The log's net hours (wall clock minus break, clamped to zero) land
/// entirely in one bucket decided by [`classify_shift_hours`] on the log's
/// start date:
///
/// - holiday: holiday hours at regular rate times the holiday multiplier,
/// - weekend: overtime hours at the member's overtime rate (regular rate
///   times the configured multiplier when unset),
/// - otherwise: regular hours at the member's regular rate (configured
///   default when unset).
///
/// Approved expenses are summed into `expense_total` (left unset when
/// zero) and `total_amount = hours x rate + expense_total`.
///
/// The entry is returned with `payment_status = Pending` and is not
/// persisted here; [`approve_work_log`] commits it atomically with the
/// log's status change.
pub fn calculate_payroll(
    work_log: &WorkLog,
    member: &CareTeamMember,
    expenses: &[WorkLogExpense],
    holidays: &[Holiday],
    defaults: &PayrollDefaults,
) -> PayrollEntry {
    let hours = work_log.elapsed_hours();
    let regular_rate = member.regular_rate.unwrap_or(defaults.regular_rate);
    let overtime_rate = member
        .overtime_rate
        .unwrap_or(regular_rate * defaults.overtime_multiplier);

    let mut regular_hours = Decimal::ZERO;
    let mut overtime_hours = Decimal::ZERO;
    let mut holiday_hours = None;
    let mut holiday_rate = None;

    let class = classify_shift_hours(work_log.start_time.date(), holidays);
    let applicable_rate = match class {
        DayClass::Holiday { multiplier } => {
            let rate = regular_rate * multiplier;
            holiday_hours = Some(hours);
            holiday_rate = Some(rate);
            rate
        }
        DayClass::Weekend => {
            overtime_hours = hours;
            overtime_rate
        }
        DayClass::Regular => {
            regular_hours = hours;
            regular_rate
        }
    };

    let expense_total: Decimal = expenses
        .iter()
        .filter(|e| e.status == ExpenseStatus::Approved)
        .map(|e| e.amount)
        .sum();
    let expense_total = if expense_total.is_zero() {
        None
    } else {
        Some(expense_total)
    };

    let total_amount = hours * applicable_rate + expense_total.unwrap_or(Decimal::ZERO);

    PayrollEntry {
        id: Uuid::new_v4(),
        work_log_id: work_log.id,
        team_member_id: work_log.team_member_id,
        care_plan_id: work_log.care_plan_id,
        regular_hours,
        overtime_hours,
        holiday_hours,
        regular_rate,
        overtime_rate,
        holiday_rate,
        expense_total,
        total_amount,
        payment_status: PaymentStatus::Pending,
        payment_date: None,
        pay_period_start: work_log.start_time,
        pay_period_end: work_log.end_time,
    }
}

/// Approves a work log and creates its payroll entry.
///
/// This is the only transition that creates payroll. The entry is
/// computed from the log, its team member's rates, the expense ledger as
/// it stands right now, and the holiday calendar; the status flip and the
/// entry insert are then committed as one atomic store operation, so no
/// reader can ever observe an approved log without its entry.
///
/// # Errors
///
/// - [`EngineError::NotFound`] when the log or its team member is missing.
/// - [`EngineError::Conflict`] when the log is not pending (approval and
///   rejection are one-way).
pub fn approve_work_log(
    store: &EngineStore,
    work_log_id: Uuid,
    defaults: &PayrollDefaults,
) -> EngineResult<PayrollEntry> {
    let work_log = store.work_log(work_log_id)?;
    if work_log.status != WorkLogStatus::Pending {
        return Err(EngineError::conflict(format!(
            "work log {} is not pending and cannot be approved",
            work_log_id
        )));
    }

    let member = store.team_member(work_log.team_member_id)?;
    let expenses = store.expenses_for(work_log_id)?;
    let holidays = store.holidays()?;

    let entry = calculate_payroll(&work_log, &member, &expenses, &holidays, defaults);
    let entry = store.commit_approval(work_log_id, entry)?;

    info!(
        work_log = %work_log_id,
        payroll_entry = %entry.id,
        total = %entry.total_amount,
        "work log approved and payroll entry created"
    );
    Ok(entry)
}
