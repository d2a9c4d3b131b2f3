//! Work log model.
//!
//! A work log records time actually worked by a care team member, usually
//! against a shift. Approval of a work log is the sole trigger for payroll
//! entry creation.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Approval state of a work log.
///
/// Transitions out of `Pending` are one-way; `Approved` and `Rejected`
/// are both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkLogStatus {
    /// Awaiting coordinator review.
    Pending,
    /// Accepted; a payroll entry exists for this log.
    Approved,
    /// Declined; no payroll entry will ever be created.
    Rejected,
}

/// A record of time actually worked against a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLog {
    /// Unique identifier for the work log.
    pub id: Uuid,
    /// The team membership of the caregiver who worked.
    pub team_member_id: Uuid,
    /// The care plan the work was performed under.
    pub care_plan_id: Uuid,
    /// The shift the work was logged against, when there is one.
    pub shift_id: Option<Uuid>,
    /// When the work started.
    pub start_time: NaiveDateTime,
    /// When the work ended.
    pub end_time: NaiveDateTime,
    /// Unpaid break taken during the work, in minutes.
    pub break_minutes: i64,
    /// Free-form notes; a rejection reason is appended here.
    pub notes: String,
    /// Approval state.
    pub status: WorkLogStatus,
}

/// Input for creating a work log from explicit values.
#[derive(Debug, Clone)]
pub struct NewWorkLog {
    /// The team membership of the caregiver who worked.
    pub team_member_id: Uuid,
    /// The care plan the work was performed under.
    pub care_plan_id: Uuid,
    /// Optional shift the work was performed against.
    pub shift_id: Option<Uuid>,
    /// When the work started.
    pub start_time: NaiveDateTime,
    /// When the work ended.
    pub end_time: NaiveDateTime,
    /// Unpaid break taken during the work, in minutes.
    pub break_minutes: i64,
    /// Free-form notes.
    pub notes: String,
}

impl WorkLog {
    /// Builds a pending work log from creation input, validating the
    /// break-duration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] when the end does not come
    /// after the start, the break is negative, or the break exceeds the
    /// elapsed wall-clock duration.
    pub fn from_new(new: NewWorkLog) -> EngineResult<Self> {
        if new.end_time <= new.start_time {
            return Err(EngineError::validation(
                "work log end time must be after start time",
            ));
        }
        if new.break_minutes < 0 {
            return Err(EngineError::validation("break duration must not be negative"));
        }
        let elapsed_minutes = (new.end_time - new.start_time).num_minutes();
        if new.break_minutes > elapsed_minutes {
            return Err(EngineError::validation(
                "break duration exceeds elapsed work time",
            ));
        }
        Ok(WorkLog {
            id: Uuid::new_v4(),
            team_member_id: new.team_member_id,
            care_plan_id: new.care_plan_id,
            shift_id: new.shift_id,
            start_time: new.start_time,
            end_time: new.end_time,
            break_minutes: new.break_minutes,
            notes: new.notes,
            status: WorkLogStatus::Pending,
        })
    }

    /// Net worked hours: wall-clock duration minus the break, clamped to
    /// zero so payroll can never go negative.
    ///
    /// # Example
    ///
    /// ```
    /// use care_shift_engine::models::{NewWorkLog, WorkLog};
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let log = WorkLog::from_new(NewWorkLog {
    ///     team_member_id: Uuid::new_v4(),
    ///     care_plan_id: Uuid::new_v4(),
    ///     shift_id: None,
    ///     start_time: NaiveDateTime::parse_from_str("2026-01-12 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end_time: NaiveDateTime::parse_from_str("2026-01-12 16:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     break_minutes: 30,
    ///     notes: String::new(),
    /// }).unwrap();
    /// assert_eq!(log.elapsed_hours(), Decimal::new(80, 1)); // 8.0
    /// ```
    pub fn elapsed_hours(&self) -> Decimal {
        let worked_minutes = (self.end_time - self.start_time).num_minutes() - self.break_minutes;
        let worked_minutes = worked_minutes.max(0);
        Decimal::new(worked_minutes, 0) / Decimal::new(60, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn new_log(start: &str, end: &str, break_minutes: i64) -> NewWorkLog {
        NewWorkLog {
            team_member_id: Uuid::new_v4(),
            care_plan_id: Uuid::new_v4(),
            shift_id: None,
            start_time: make_datetime("2026-01-12", start),
            end_time: make_datetime("2026-01-12", end),
            break_minutes,
            notes: String::new(),
        }
    }

    #[test]
    fn test_new_log_is_pending() {
        let log = WorkLog::from_new(new_log("08:00:00", "16:00:00", 0)).unwrap();
        assert_eq!(log.status, WorkLogStatus::Pending);
    }

    #[test]
    fn test_elapsed_hours_subtracts_break() {
        let log = WorkLog::from_new(new_log("08:00:00", "16:00:00", 60)).unwrap();
        assert_eq!(log.elapsed_hours(), Decimal::new(70, 1)); // 7.0
    }

    #[test]
    fn test_elapsed_hours_without_break() {
        let log = WorkLog::from_new(new_log("08:00:00", "16:00:00", 0)).unwrap();
        assert_eq!(log.elapsed_hours(), Decimal::new(80, 1)); // 8.0
    }

    #[test]
    fn test_negative_break_rejected() {
        let err = WorkLog::from_new(new_log("08:00:00", "16:00:00", -15)).unwrap_err();
        assert!(matches!(err, EngineError::Validation { .. }));
    }

    #[test]
    fn test_break_longer_than_elapsed_rejected() {
        let err = WorkLog::from_new(new_log("08:00:00", "09:00:00", 61)).unwrap_err();
        assert!(matches!(err, EngineError::Validation { .. }));
    }

    #[test]
    fn test_break_equal_to_elapsed_allowed() {
        let log = WorkLog::from_new(new_log("08:00:00", "09:00:00", 60)).unwrap();
        assert_eq!(log.elapsed_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let err = WorkLog::from_new(new_log("16:00:00", "08:00:00", 0)).unwrap_err();
        assert!(matches!(err, EngineError::Validation { .. }));
    }

    #[test]
    fn test_overnight_log_elapsed_hours() {
        let log = WorkLog::from_new(NewWorkLog {
            team_member_id: Uuid::new_v4(),
            care_plan_id: Uuid::new_v4(),
            shift_id: None,
            start_time: make_datetime("2026-01-12", "22:00:00"),
            end_time: make_datetime("2026-01-13", "06:00:00"),
            break_minutes: 0,
            notes: String::new(),
        })
        .unwrap();
        assert_eq!(log.elapsed_hours(), Decimal::new(80, 1)); // 8.0
    }
}
