//! Backing store for shifts, work logs, expenses and payroll entries.
//!
//! [`EngineStore`] is an in-memory store guarded by a single `RwLock`.
//! Every public operation is one lock acquisition, which gives the engine
//! its per-row transactional behaviour: in particular
//! [`EngineStore::commit_approval`] re-checks and writes the work-log
//! status flip together with the payroll entry insert under one write
//! lock, so no reader can observe an approved log without its entry.
//!
//! A poisoned lock is surfaced as [`EngineError::Storage`], never
//! panicked on.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CareTeamMember, ExpenseStatus, Holiday, NewExpense, NewShift, NewWorkLog, PaymentStatus,
    PayrollEntry, Shift, ShiftStatus, ShiftUpdate, WorkLog, WorkLogExpense, WorkLogStatus,
};

/// Assignment-state filter for shift listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftFilter {
    /// Every shift of the plan, regardless of status.
    #[default]
    All,
    /// Shifts with an assigned caregiver.
    Assigned,
    /// Open shifts awaiting a caregiver.
    Unassigned,
    /// Completed shifts.
    Completed,
}

impl ShiftFilter {
    fn matches(self, shift: &Shift) -> bool {
        match self {
            ShiftFilter::All => true,
            ShiftFilter::Assigned => shift.status == ShiftStatus::Assigned,
            ShiftFilter::Unassigned => shift.status == ShiftStatus::Open,
            ShiftFilter::Completed => shift.status == ShiftStatus::Completed,
        }
    }
}

impl std::str::FromStr for ShiftFilter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ShiftFilter::All),
            "assigned" => Ok(ShiftFilter::Assigned),
            "unassigned" => Ok(ShiftFilter::Unassigned),
            "completed" => Ok(ShiftFilter::Completed),
            other => Err(EngineError::validation(format!(
                "unknown shift filter '{}' (expected all, assigned, unassigned or completed)",
                other
            ))),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    shifts: HashMap<Uuid, Shift>,
    work_logs: HashMap<Uuid, WorkLog>,
    expenses: HashMap<Uuid, WorkLogExpense>,
    members: HashMap<Uuid, CareTeamMember>,
    holidays: Vec<Holiday>,
    payroll: HashMap<Uuid, PayrollEntry>,
}

impl Inner {
    fn member_for(&self, care_plan_id: Uuid, caregiver_id: Uuid) -> Option<&CareTeamMember> {
        self.members
            .values()
            .find(|m| m.care_plan_id == care_plan_id && m.caregiver_id == caregiver_id)
    }
}

/// The engine's backing store.
#[derive(Debug, Default)]
pub struct EngineStore {
    inner: RwLock<Inner>,
}

impl EngineStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| EngineError::Storage {
            message: "store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| EngineError::Storage {
            message: "store lock poisoned".to_string(),
        })
    }

    // =========================================================================
    //  Shifts
    // =========================================================================

    /// Creates a shift. The initial status is derived from the caregiver
    /// reference; assigning at creation validates the caregiver is an
    /// active team member of the plan.
    pub fn create_shift(&self, new: NewShift) -> EngineResult<Shift> {
        if new.end_time <= new.start_time {
            return Err(EngineError::validation(
                "shift end time must be after start time",
            ));
        }
        let mut inner = self.write()?;
        if let Some(caregiver_id) = new.caregiver_id {
            check_assignable(&inner, new.care_plan_id, caregiver_id)?;
        }
        let shift = Shift::from_new(new);
        inner.shifts.insert(shift.id, shift.clone());
        Ok(shift)
    }

    /// Fetches one shift.
    pub fn shift(&self, id: Uuid) -> EngineResult<Shift> {
        self.read()?
            .shifts
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("Shift", id))
    }

    /// Lists a plan's shifts matching the filter, ordered by start time.
    pub fn shifts_for_plan(&self, care_plan_id: Uuid, filter: ShiftFilter) -> EngineResult<Vec<Shift>> {
        let inner = self.read()?;
        let mut shifts: Vec<Shift> = inner
            .shifts
            .values()
            .filter(|s| s.care_plan_id == care_plan_id && filter.matches(s))
            .cloned()
            .collect();
        shifts.sort_by_key(|s| s.start_time);
        Ok(shifts)
    }

    /// Applies a partial update to a shift.
    ///
    /// An explicit `Completed`/`Cancelled` status takes precedence;
    /// otherwise setting the caregiver reference forces `Assigned` and
    /// clearing it forces `Open`, atomically with the reference change.
    /// Terminal shifts reject all updates.
    pub fn update_shift(&self, id: Uuid, update: ShiftUpdate) -> EngineResult<Shift> {
        if let Some(status) = update.status {
            if !status.is_terminal() {
                return Err(EngineError::validation(
                    "shift status can only be set to completed or cancelled; \
                     assignment is driven by the caregiver reference",
                ));
            }
        }

        let mut inner = self.write()?;
        let care_plan_id = inner
            .shifts
            .get(&id)
            .ok_or_else(|| EngineError::not_found("Shift", id))?
            .care_plan_id;
        if let Some(Some(caregiver_id)) = update.caregiver_id {
            check_assignable(&inner, care_plan_id, caregiver_id)?;
        }

        let shift = inner
            .shifts
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found("Shift", id))?;
        if shift.status.is_terminal() {
            return Err(EngineError::conflict(format!(
                "shift {} is {} and can no longer change",
                id, shift.status
            )));
        }

        let new_start = update.start_time.unwrap_or(shift.start_time);
        let new_end = update.end_time.unwrap_or(shift.end_time);
        if new_end <= new_start {
            return Err(EngineError::validation(
                "shift end time must be after start time",
            ));
        }
        shift.start_time = new_start;
        shift.end_time = new_end;

        if let Some(title) = update.title {
            shift.title = title;
        }
        if let Some(description) = update.description {
            shift.description = description;
        }
        if let Some(location) = update.location {
            shift.location = Some(location);
        }
        if let Some(pattern) = update.recurring_pattern {
            shift.recurring_pattern = Some(pattern);
        }
        if let Some(calendar_ref) = update.calendar_event_ref {
            shift.calendar_event_ref = Some(calendar_ref);
        }
        if let Some(caregiver_change) = update.caregiver_id {
            shift.caregiver_id = caregiver_change;
        }

        shift.status = match update.status {
            Some(terminal) => terminal,
            None if update.caregiver_id.is_some() => {
                if shift.caregiver_id.is_some() {
                    ShiftStatus::Assigned
                } else {
                    ShiftStatus::Open
                }
            }
            None => shift.status,
        };

        Ok(shift.clone())
    }

    /// Hard-deletes a shift.
    ///
    /// Deletion is restricted while any work log references the shift;
    /// dependent records must be deleted or reassigned first. The engine
    /// never cascades.
    pub fn delete_shift(&self, id: Uuid) -> EngineResult<()> {
        let mut inner = self.write()?;
        if !inner.shifts.contains_key(&id) {
            return Err(EngineError::not_found("Shift", id));
        }
        if inner.work_logs.values().any(|l| l.shift_id == Some(id)) {
            return Err(EngineError::conflict(format!(
                "shift {} still has dependent work logs",
                id
            )));
        }
        inner.shifts.remove(&id);
        info!(shift = %id, "shift deleted");
        Ok(())
    }

    // =========================================================================
    //  Work logs
    // =========================================================================

    /// Creates a pending work log from explicit input.
    pub fn create_work_log(&self, new: NewWorkLog) -> EngineResult<WorkLog> {
        let mut inner = self.write()?;
        let member = inner
            .members
            .get(&new.team_member_id)
            .ok_or_else(|| EngineError::not_found("CareTeamMember", new.team_member_id))?;
        if member.care_plan_id != new.care_plan_id {
            return Err(EngineError::validation(
                "team member does not belong to the given care plan",
            ));
        }
        if let Some(shift_id) = new.shift_id {
            if !inner.shifts.contains_key(&shift_id) {
                return Err(EngineError::not_found("Shift", shift_id));
            }
        }
        let log = WorkLog::from_new(new)?;
        inner.work_logs.insert(log.id, log.clone());
        Ok(log)
    }

    /// Derives a pending work log from a shift: care plan and start/end
    /// are copied, and the team member is resolved from the shift's
    /// assigned caregiver.
    ///
    /// # Errors
    ///
    /// [`EngineError::Conflict`] when the shift has no assigned caregiver.
    pub fn work_log_from_shift(
        &self,
        shift_id: Uuid,
        break_minutes: i64,
        notes: String,
    ) -> EngineResult<WorkLog> {
        let mut inner = self.write()?;
        let shift = inner
            .shifts
            .get(&shift_id)
            .ok_or_else(|| EngineError::not_found("Shift", shift_id))?
            .clone();
        let caregiver_id = shift.caregiver_id.ok_or_else(|| {
            EngineError::conflict(format!(
                "shift {} has no assigned caregiver to log work for",
                shift_id
            ))
        })?;
        let member_id = inner
            .member_for(shift.care_plan_id, caregiver_id)
            .ok_or_else(|| EngineError::not_found("CareTeamMember", caregiver_id))?
            .id;
        let log = WorkLog::from_new(NewWorkLog {
            team_member_id: member_id,
            care_plan_id: shift.care_plan_id,
            shift_id: Some(shift.id),
            start_time: shift.start_time,
            end_time: shift.end_time,
            break_minutes,
            notes,
        })?;
        inner.work_logs.insert(log.id, log.clone());
        Ok(log)
    }

    /// Fetches one work log.
    pub fn work_log(&self, id: Uuid) -> EngineResult<WorkLog> {
        self.read()?
            .work_logs
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("WorkLog", id))
    }

    /// Lists a plan's work logs, ordered by start time.
    pub fn work_logs_for_plan(&self, care_plan_id: Uuid) -> EngineResult<Vec<WorkLog>> {
        let inner = self.read()?;
        let mut logs: Vec<WorkLog> = inner
            .work_logs
            .values()
            .filter(|l| l.care_plan_id == care_plan_id)
            .cloned()
            .collect();
        logs.sort_by_key(|l| l.start_time);
        Ok(logs)
    }

    /// Rejects a pending work log, appending the optional reason to its
    /// notes. Rejection is terminal and never creates payroll.
    pub fn reject_work_log(&self, id: Uuid, reason: Option<String>) -> EngineResult<WorkLog> {
        let mut inner = self.write()?;
        let log = inner
            .work_logs
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found("WorkLog", id))?;
        if log.status != WorkLogStatus::Pending {
            return Err(EngineError::conflict(format!(
                "work log {} is not pending and cannot be rejected",
                id
            )));
        }
        log.status = WorkLogStatus::Rejected;
        if let Some(reason) = reason {
            if log.notes.is_empty() {
                log.notes = format!("Rejected: {}", reason);
            } else {
                log.notes.push_str(&format!("\nRejected: {}", reason));
            }
        }
        Ok(log.clone())
    }

    /// Atomically marks a pending work log approved and records its
    /// payroll entry.
    ///
    /// Both writes happen under one lock, after re-checking that the log
    /// is still pending and has no entry yet, so an approved log without
    /// an entry (or a second entry for the same log) is unobservable.
    pub fn commit_approval(&self, work_log_id: Uuid, entry: PayrollEntry) -> EngineResult<PayrollEntry> {
        let mut inner = self.write()?;
        if inner.payroll.values().any(|e| e.work_log_id == work_log_id) {
            return Err(EngineError::conflict(format!(
                "payroll entry already exists for work log {}",
                work_log_id
            )));
        }
        {
            let log = inner
                .work_logs
                .get_mut(&work_log_id)
                .ok_or_else(|| EngineError::not_found("WorkLog", work_log_id))?;
            if log.status != WorkLogStatus::Pending {
                return Err(EngineError::conflict(format!(
                    "work log {} is not pending and cannot be approved",
                    work_log_id
                )));
            }
            log.status = WorkLogStatus::Approved;
        }
        inner.payroll.insert(entry.id, entry.clone());
        Ok(entry)
    }

    // =========================================================================
    //  Expenses
    // =========================================================================

    /// Attaches a pending expense to a work log.
    pub fn add_expense(&self, new: NewExpense) -> EngineResult<WorkLogExpense> {
        let mut inner = self.write()?;
        if !inner.work_logs.contains_key(&new.work_log_id) {
            return Err(EngineError::not_found("WorkLog", new.work_log_id));
        }
        let expense = WorkLogExpense::from_new(new)?;
        inner.expenses.insert(expense.id, expense.clone());
        Ok(expense)
    }

    /// Lists the expenses attached to a work log.
    pub fn expenses_for(&self, work_log_id: Uuid) -> EngineResult<Vec<WorkLogExpense>> {
        let inner = self.read()?;
        if !inner.work_logs.contains_key(&work_log_id) {
            return Err(EngineError::not_found("WorkLog", work_log_id));
        }
        Ok(inner
            .expenses
            .values()
            .filter(|e| e.work_log_id == work_log_id)
            .cloned()
            .collect())
    }

    /// Settles a pending expense as approved or rejected. Settled
    /// expenses cannot change again.
    pub fn set_expense_status(&self, id: Uuid, status: ExpenseStatus) -> EngineResult<WorkLogExpense> {
        if status == ExpenseStatus::Pending {
            return Err(EngineError::validation(
                "expense status can only be set to approved or rejected",
            ));
        }
        let mut inner = self.write()?;
        let expense = inner
            .expenses
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found("WorkLogExpense", id))?;
        if expense.status != ExpenseStatus::Pending {
            return Err(EngineError::conflict(format!(
                "expense {} has already been settled",
                id
            )));
        }
        expense.status = status;
        Ok(expense.clone())
    }

    // =========================================================================
    //  Team members and holidays (external-collaborator read surface)
    // =========================================================================

    /// Registers or replaces a team membership record. Membership is
    /// owned by plan coordination; the engine only reads it back for rate
    /// lookup and assignment validation.
    pub fn upsert_team_member(&self, member: CareTeamMember) -> EngineResult<()> {
        self.write()?.members.insert(member.id, member);
        Ok(())
    }

    /// Fetches one team membership record.
    pub fn team_member(&self, id: Uuid) -> EngineResult<CareTeamMember> {
        self.read()?
            .members
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("CareTeamMember", id))
    }

    /// Adds a holiday to the calendar, replacing any entry on the same
    /// date.
    pub fn add_holiday(&self, holiday: Holiday) -> EngineResult<()> {
        if holiday.multiplier < Decimal::ONE {
            return Err(EngineError::validation(
                "holiday multiplier must be at least 1.0",
            ));
        }
        let mut inner = self.write()?;
        inner.holidays.retain(|h| h.date != holiday.date);
        inner.holidays.push(holiday);
        Ok(())
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> EngineResult<Vec<Holiday>> {
        Ok(self.read()?.holidays.clone())
    }

    // =========================================================================
    //  Payroll entries and payments
    // =========================================================================

    /// Fetches one payroll entry.
    pub fn payroll_entry(&self, id: Uuid) -> EngineResult<PayrollEntry> {
        self.read()?
            .payroll
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("PayrollEntry", id))
    }

    /// Lists a plan's payroll entries, ordered by pay period start.
    pub fn payroll_for_plan(&self, care_plan_id: Uuid) -> EngineResult<Vec<PayrollEntry>> {
        let inner = self.read()?;
        let mut entries: Vec<PayrollEntry> = inner
            .payroll
            .values()
            .filter(|e| e.care_plan_id == care_plan_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.pay_period_start);
        Ok(entries)
    }

    /// Advances a pending payroll entry to approved.
    pub fn approve_payment(&self, id: Uuid) -> EngineResult<PayrollEntry> {
        let mut inner = self.write()?;
        let entry = inner
            .payroll
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found("PayrollEntry", id))?;
        if entry.payment_status != PaymentStatus::Pending {
            return Err(EngineError::conflict(format!(
                "payroll entry {} is not pending payment approval",
                id
            )));
        }
        entry.payment_status = PaymentStatus::Approved;
        Ok(entry.clone())
    }

    /// Marks a payroll entry paid and records the payment date. A paid
    /// entry is immutable; there is no reversal.
    pub fn process_payment(&self, id: Uuid, payment_date: NaiveDate) -> EngineResult<PayrollEntry> {
        let mut inner = self.write()?;
        let entry = inner
            .payroll
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found("PayrollEntry", id))?;
        if entry.payment_status == PaymentStatus::Paid {
            return Err(EngineError::conflict(format!(
                "payroll entry {} has already been paid",
                id
            )));
        }
        entry.payment_status = PaymentStatus::Paid;
        entry.payment_date = Some(payment_date);
        info!(payroll_entry = %id, date = %payment_date, "payroll entry paid");
        Ok(entry.clone())
    }
}

fn check_assignable(inner: &Inner, care_plan_id: Uuid, caregiver_id: Uuid) -> EngineResult<()> {
    let member = inner
        .member_for(care_plan_id, caregiver_id)
        .ok_or_else(|| EngineError::not_found("CareTeamMember", caregiver_id))?;
    if !member.is_active() {
        return Err(EngineError::conflict(format!(
            "caregiver {} is not an active member of the care team",
            caregiver_id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, MemberStatus};
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    struct Fixture {
        store: EngineStore,
        plan: Uuid,
        family: Uuid,
        caregiver: Uuid,
        member: Uuid,
    }

    fn fixture() -> Fixture {
        let store = EngineStore::new();
        let plan = Uuid::new_v4();
        let caregiver = Uuid::new_v4();
        let member = Uuid::new_v4();
        store
            .upsert_team_member(CareTeamMember {
                id: member,
                care_plan_id: plan,
                caregiver_id: caregiver,
                role: "primary caregiver".to_string(),
                regular_rate: Some(dec("20")),
                overtime_rate: None,
                status: MemberStatus::Active,
            })
            .unwrap();
        Fixture {
            store,
            plan,
            family: Uuid::new_v4(),
            caregiver,
            member,
        }
    }

    fn new_shift(fx: &Fixture, caregiver: Option<Uuid>) -> NewShift {
        NewShift {
            care_plan_id: fx.plan,
            family_id: fx.family,
            caregiver_id: caregiver,
            title: "Morning care".to_string(),
            description: "Personal care".to_string(),
            location: None,
            start_time: make_datetime("2026-01-12 08:00:00"),
            end_time: make_datetime("2026-01-12 16:00:00"),
            recurring_pattern: None,
            calendar_event_ref: None,
        }
    }

    fn pending_log(fx: &Fixture) -> WorkLog {
        fx.store
            .create_work_log(NewWorkLog {
                team_member_id: fx.member,
                care_plan_id: fx.plan,
                shift_id: None,
                start_time: make_datetime("2026-01-12 08:00:00"),
                end_time: make_datetime("2026-01-12 16:00:00"),
                break_minutes: 0,
                notes: String::new(),
            })
            .unwrap()
    }

    fn entry_for(log: &WorkLog) -> PayrollEntry {
        PayrollEntry {
            id: Uuid::new_v4(),
            work_log_id: log.id,
            team_member_id: log.team_member_id,
            care_plan_id: log.care_plan_id,
            regular_hours: dec("8"),
            overtime_hours: Decimal::ZERO,
            holiday_hours: None,
            regular_rate: dec("20"),
            overtime_rate: dec("30"),
            holiday_rate: None,
            expense_total: None,
            total_amount: dec("160"),
            payment_status: PaymentStatus::Pending,
            payment_date: None,
            pay_period_start: log.start_time,
            pay_period_end: log.end_time,
        }
    }

    // ==========================================================================
    // Shift lifecycle
    // ==========================================================================
    #[test]
    fn test_assigning_caregiver_sets_assigned() {
        let fx = fixture();
        let shift = fx.store.create_shift(new_shift(&fx, None)).unwrap();
        let updated = fx
            .store
            .update_shift(
                shift.id,
                ShiftUpdate {
                    caregiver_id: Some(Some(fx.caregiver)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, ShiftStatus::Assigned);
        assert_eq!(updated.caregiver_id, Some(fx.caregiver));
    }

    #[test]
    fn test_assignment_is_idempotent() {
        let fx = fixture();
        let shift = fx.store.create_shift(new_shift(&fx, None)).unwrap();
        for _ in 0..2 {
            let updated = fx
                .store
                .update_shift(
                    shift.id,
                    ShiftUpdate {
                        caregiver_id: Some(Some(fx.caregiver)),
                        ..Default::default()
                    },
                )
                .unwrap();
            assert_eq!(updated.status, ShiftStatus::Assigned);
        }
    }

    #[test]
    fn test_clearing_caregiver_reopens_shift() {
        let fx = fixture();
        let shift = fx
            .store
            .create_shift(new_shift(&fx, Some(fx.caregiver)))
            .unwrap();
        assert_eq!(shift.status, ShiftStatus::Assigned);
        let updated = fx
            .store
            .update_shift(
                shift.id,
                ShiftUpdate {
                    caregiver_id: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, ShiftStatus::Open);
        assert!(updated.caregiver_id.is_none());
    }

    #[test]
    fn test_explicit_terminal_status_takes_precedence() {
        let fx = fixture();
        let shift = fx.store.create_shift(new_shift(&fx, None)).unwrap();
        let updated = fx
            .store
            .update_shift(
                shift.id,
                ShiftUpdate {
                    caregiver_id: Some(Some(fx.caregiver)),
                    status: Some(ShiftStatus::Completed),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, ShiftStatus::Completed);
        assert_eq!(updated.caregiver_id, Some(fx.caregiver));
    }

    #[test]
    fn test_non_terminal_explicit_status_rejected() {
        let fx = fixture();
        let shift = fx.store.create_shift(new_shift(&fx, None)).unwrap();
        let err = fx
            .store
            .update_shift(
                shift.id,
                ShiftUpdate {
                    status: Some(ShiftStatus::Assigned),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation { .. }));
    }

    #[test]
    fn test_terminal_shift_rejects_updates() {
        let fx = fixture();
        let shift = fx.store.create_shift(new_shift(&fx, None)).unwrap();
        fx.store
            .update_shift(
                shift.id,
                ShiftUpdate {
                    status: Some(ShiftStatus::Cancelled),
                    ..Default::default()
                },
            )
            .unwrap();
        let err = fx
            .store
            .update_shift(
                shift.id,
                ShiftUpdate {
                    title: Some("new title".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));
    }

    #[test]
    fn test_assigning_unknown_caregiver_not_found() {
        let fx = fixture();
        let shift = fx.store.create_shift(new_shift(&fx, None)).unwrap();
        let err = fx
            .store
            .update_shift(
                shift.id,
                ShiftUpdate {
                    caregiver_id: Some(Some(Uuid::new_v4())),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[test]
    fn test_assigning_inactive_member_conflicts() {
        let fx = fixture();
        let inactive_caregiver = Uuid::new_v4();
        fx.store
            .upsert_team_member(CareTeamMember {
                id: Uuid::new_v4(),
                care_plan_id: fx.plan,
                caregiver_id: inactive_caregiver,
                role: "former caregiver".to_string(),
                regular_rate: None,
                overtime_rate: None,
                status: MemberStatus::Inactive,
            })
            .unwrap();
        let shift = fx.store.create_shift(new_shift(&fx, None)).unwrap();
        let err = fx
            .store
            .update_shift(
                shift.id,
                ShiftUpdate {
                    caregiver_id: Some(Some(inactive_caregiver)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));
    }

    #[test]
    fn test_shift_filters() {
        let fx = fixture();
        let open = fx.store.create_shift(new_shift(&fx, None)).unwrap();
        let assigned = fx
            .store
            .create_shift(new_shift(&fx, Some(fx.caregiver)))
            .unwrap();
        let completed = fx.store.create_shift(new_shift(&fx, None)).unwrap();
        fx.store
            .update_shift(
                completed.id,
                ShiftUpdate {
                    status: Some(ShiftStatus::Completed),
                    ..Default::default()
                },
            )
            .unwrap();

        let all = fx.store.shifts_for_plan(fx.plan, ShiftFilter::All).unwrap();
        assert_eq!(all.len(), 3);
        let unassigned = fx
            .store
            .shifts_for_plan(fx.plan, ShiftFilter::Unassigned)
            .unwrap();
        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0].id, open.id);
        let assigned_list = fx
            .store
            .shifts_for_plan(fx.plan, ShiftFilter::Assigned)
            .unwrap();
        assert_eq!(assigned_list.len(), 1);
        assert_eq!(assigned_list[0].id, assigned.id);
        let completed_list = fx
            .store
            .shifts_for_plan(fx.plan, ShiftFilter::Completed)
            .unwrap();
        assert_eq!(completed_list.len(), 1);
        assert_eq!(completed_list[0].id, completed.id);
    }

    #[test]
    fn test_filter_parses_from_str() {
        assert_eq!("unassigned".parse::<ShiftFilter>().unwrap(), ShiftFilter::Unassigned);
        assert!("everything".parse::<ShiftFilter>().is_err());
    }

    #[test]
    fn test_delete_restricted_by_dependent_work_log() {
        let fx = fixture();
        let shift = fx
            .store
            .create_shift(new_shift(&fx, Some(fx.caregiver)))
            .unwrap();
        fx.store
            .work_log_from_shift(shift.id, 0, String::new())
            .unwrap();
        let err = fx.store.delete_shift(shift.id).unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));
        // Still there.
        assert!(fx.store.shift(shift.id).is_ok());
    }

    #[test]
    fn test_delete_without_dependents_succeeds() {
        let fx = fixture();
        let shift = fx.store.create_shift(new_shift(&fx, None)).unwrap();
        fx.store.delete_shift(shift.id).unwrap();
        assert!(matches!(
            fx.store.shift(shift.id).unwrap_err(),
            EngineError::NotFound { .. }
        ));
    }

    // ==========================================================================
    // Work logs
    // ==========================================================================
    #[test]
    fn test_work_log_from_shift_copies_fields() {
        let fx = fixture();
        let shift = fx
            .store
            .create_shift(new_shift(&fx, Some(fx.caregiver)))
            .unwrap();
        let log = fx
            .store
            .work_log_from_shift(shift.id, 30, "derived".to_string())
            .unwrap();
        assert_eq!(log.care_plan_id, fx.plan);
        assert_eq!(log.shift_id, Some(shift.id));
        assert_eq!(log.team_member_id, fx.member);
        assert_eq!(log.start_time, shift.start_time);
        assert_eq!(log.end_time, shift.end_time);
        assert_eq!(log.break_minutes, 30);
    }

    #[test]
    fn test_work_log_from_unassigned_shift_conflicts() {
        let fx = fixture();
        let shift = fx.store.create_shift(new_shift(&fx, None)).unwrap();
        let err = fx
            .store
            .work_log_from_shift(shift.id, 0, String::new())
            .unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));
    }

    #[test]
    fn test_reject_appends_reason_to_notes() {
        let fx = fixture();
        let log = pending_log(&fx);
        let rejected = fx
            .store
            .reject_work_log(log.id, Some("times do not match the roster".to_string()))
            .unwrap();
        assert_eq!(rejected.status, WorkLogStatus::Rejected);
        assert_eq!(rejected.notes, "Rejected: times do not match the roster");
    }

    #[test]
    fn test_reject_is_terminal() {
        let fx = fixture();
        let log = pending_log(&fx);
        fx.store.reject_work_log(log.id, None).unwrap();
        let err = fx.store.reject_work_log(log.id, None).unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));
    }

    // ==========================================================================
    // Atomic approval
    // ==========================================================================
    #[test]
    fn test_commit_approval_flips_status_and_records_entry() {
        let fx = fixture();
        let log = pending_log(&fx);
        let entry = entry_for(&log);
        fx.store.commit_approval(log.id, entry.clone()).unwrap();

        assert_eq!(fx.store.work_log(log.id).unwrap().status, WorkLogStatus::Approved);
        assert_eq!(fx.store.payroll_entry(entry.id).unwrap().work_log_id, log.id);
    }

    #[test]
    fn test_commit_approval_rejected_log_conflicts_and_writes_nothing() {
        let fx = fixture();
        let log = pending_log(&fx);
        fx.store.reject_work_log(log.id, None).unwrap();
        let entry = entry_for(&log);
        let err = fx.store.commit_approval(log.id, entry.clone()).unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));
        assert_eq!(fx.store.work_log(log.id).unwrap().status, WorkLogStatus::Rejected);
        assert!(fx.store.payroll_entry(entry.id).is_err());
    }

    #[test]
    fn test_commit_approval_is_once_only() {
        let fx = fixture();
        let log = pending_log(&fx);
        fx.store.commit_approval(log.id, entry_for(&log)).unwrap();
        let err = fx.store.commit_approval(log.id, entry_for(&log)).unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));
        assert_eq!(fx.store.payroll_for_plan(fx.plan).unwrap().len(), 1);
    }

    // ==========================================================================
    // Expenses
    // ==========================================================================
    #[test]
    fn test_expense_lifecycle() {
        let fx = fixture();
        let log = pending_log(&fx);
        let expense = fx
            .store
            .add_expense(NewExpense {
                work_log_id: log.id,
                category: ExpenseCategory::Food,
                amount: dec("12.50"),
                description: "groceries".to_string(),
                receipt_ref: None,
            })
            .unwrap();
        assert_eq!(expense.status, ExpenseStatus::Pending);

        let approved = fx
            .store
            .set_expense_status(expense.id, ExpenseStatus::Approved)
            .unwrap();
        assert_eq!(approved.status, ExpenseStatus::Approved);

        // Settled expenses cannot change again.
        let err = fx
            .store
            .set_expense_status(expense.id, ExpenseStatus::Rejected)
            .unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));
    }

    #[test]
    fn test_expense_for_unknown_work_log_not_found() {
        let fx = fixture();
        let err = fx
            .store
            .add_expense(NewExpense {
                work_log_id: Uuid::new_v4(),
                category: ExpenseCategory::Other,
                amount: dec("1"),
                description: String::new(),
                receipt_ref: None,
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    // ==========================================================================
    // Payments
    // ==========================================================================
    #[test]
    fn test_payment_advances_and_is_final() {
        let fx = fixture();
        let log = pending_log(&fx);
        let entry = fx.store.commit_approval(log.id, entry_for(&log)).unwrap();

        let approved = fx.store.approve_payment(entry.id).unwrap();
        assert_eq!(approved.payment_status, PaymentStatus::Approved);

        let paid = fx
            .store
            .process_payment(entry.id, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap())
            .unwrap();
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert_eq!(paid.payment_date, NaiveDate::from_ymd_opt(2026, 1, 31));

        let err = fx
            .store
            .process_payment(entry.id, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap())
            .unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));
    }

    #[test]
    fn test_holiday_replaces_same_date() {
        let fx = fixture();
        let date = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        fx.store
            .add_holiday(Holiday {
                date,
                name: "Christmas Day".to_string(),
                multiplier: dec("2.0"),
            })
            .unwrap();
        fx.store
            .add_holiday(Holiday {
                date,
                name: "Christmas Day".to_string(),
                multiplier: dec("2.5"),
            })
            .unwrap();
        let holidays = fx.store.holidays().unwrap();
        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].multiplier, dec("2.5"));
    }

    #[test]
    fn test_sub_unit_holiday_multiplier_rejected() {
        let fx = fixture();
        let err = fx
            .store
            .add_holiday(Holiday {
                date: NaiveDate::from_ymd_opt(2026, 12, 25).unwrap(),
                name: "Bad Day".to_string(),
                multiplier: dec("0.5"),
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation { .. }));
    }
}
