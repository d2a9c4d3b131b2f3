//! Shift model and related types.
//!
//! This module defines the [`Shift`] entity (a concrete, assignable unit of
//! care coverage), the [`ShiftDefinition`] template it can be generated
//! from, and the input types used to create and partially update shifts.

use chrono::{NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a shift.
///
/// `Open` and `Assigned` are derived from the caregiver reference;
/// `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// No caregiver is assigned; the shift can be claimed.
    Open,
    /// A caregiver is assigned to the shift.
    Assigned,
    /// The shift was worked. Terminal.
    Completed,
    /// The shift was called off. Terminal.
    Cancelled,
}

impl ShiftStatus {
    /// Returns true for the terminal states `Completed` and `Cancelled`.
    pub fn is_terminal(self) -> bool {
        matches!(self, ShiftStatus::Completed | ShiftStatus::Cancelled)
    }
}

impl std::fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShiftStatus::Open => "open",
            ShiftStatus::Assigned => "assigned",
            ShiftStatus::Completed => "completed",
            ShiftStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", name)
    }
}

/// A time-bounded unit of care coverage, assignable to one caregiver.
///
/// Invariant: `status == Assigned` iff `caregiver_id` is `Some` and the
/// shift is not in a terminal state; `status == Open` iff `caregiver_id`
/// is `None` and the shift is not terminal. Assignment changes go through
/// the store so the status is updated atomically with the reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: Uuid,
    /// The care plan this shift provides coverage for.
    pub care_plan_id: Uuid,
    /// The family the care plan belongs to.
    pub family_id: Uuid,
    /// The assigned caregiver, if any.
    pub caregiver_id: Option<Uuid>,
    /// Short human-readable title.
    pub title: String,
    /// Free-form description of the coverage.
    pub description: String,
    /// Where the care takes place.
    pub location: Option<String>,
    /// Current lifecycle status.
    pub status: ShiftStatus,
    /// When coverage starts.
    pub start_time: NaiveDateTime,
    /// When coverage ends.
    pub end_time: NaiveDateTime,
    /// Free-form day list tag when the shift came from a recurring
    /// template (e.g. "monday,wednesday").
    pub recurring_pattern: Option<String>,
    /// Reference into an external calendar, if the shift was mirrored there.
    pub calendar_event_ref: Option<String>,
}

/// Input for creating a shift directly (as opposed to generating one from
/// a [`ShiftDefinition`]).
#[derive(Debug, Clone)]
pub struct NewShift {
    /// The care plan this shift provides coverage for.
    pub care_plan_id: Uuid,
    /// The family the care plan belongs to.
    pub family_id: Uuid,
    /// Optional caregiver to assign immediately.
    pub caregiver_id: Option<Uuid>,
    /// Short human-readable title.
    pub title: String,
    /// Free-form description of the coverage.
    pub description: String,
    /// Where the care takes place.
    pub location: Option<String>,
    /// When coverage starts.
    pub start_time: NaiveDateTime,
    /// When coverage ends.
    pub end_time: NaiveDateTime,
    /// Free-form day list tag for recurring shifts.
    pub recurring_pattern: Option<String>,
    /// Reference into an external calendar.
    pub calendar_event_ref: Option<String>,
}

impl Shift {
    /// Builds a shift from creation input, deriving the initial status
    /// from the caregiver reference.
    pub fn from_new(new: NewShift) -> Self {
        let status = if new.caregiver_id.is_some() {
            ShiftStatus::Assigned
        } else {
            ShiftStatus::Open
        };
        Shift {
            id: Uuid::new_v4(),
            care_plan_id: new.care_plan_id,
            family_id: new.family_id,
            caregiver_id: new.caregiver_id,
            title: new.title,
            description: new.description,
            location: new.location,
            status,
            start_time: new.start_time,
            end_time: new.end_time,
            recurring_pattern: new.recurring_pattern,
            calendar_event_ref: new.calendar_event_ref,
        }
    }
}

/// Partial update for a shift.
///
/// `None` fields are left untouched. The caregiver reference is doubly
/// optional so that "not mentioned" (`None`) and "explicitly cleared"
/// (`Some(None)`) can be told apart.
#[derive(Debug, Clone, Default)]
pub struct ShiftUpdate {
    /// New title, if changing.
    pub title: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New location, if changing.
    pub location: Option<String>,
    /// Set (`Some(Some(id))`) or clear (`Some(None)`) the assigned caregiver.
    pub caregiver_id: Option<Option<Uuid>>,
    /// Explicit status change. Only `Completed` and `Cancelled` are
    /// accepted here; open/assigned are derived from the caregiver
    /// reference and cannot be set directly.
    pub status: Option<ShiftStatus>,
    /// New start timestamp, if changing.
    pub start_time: Option<NaiveDateTime>,
    /// New end timestamp, if changing.
    pub end_time: Option<NaiveDateTime>,
    /// New recurring-pattern tag, if changing.
    pub recurring_pattern: Option<String>,
    /// New external-calendar reference, if changing.
    pub calendar_event_ref: Option<String>,
}

/// A recurring coverage template: a set of weekdays plus a daily time
/// window. Used only at generation time, never persisted as a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftDefinition {
    /// The weekdays the coverage repeats on. Must be non-empty.
    pub days: Vec<Weekday>,
    /// Daily start time of the coverage window.
    pub start_time: NaiveTime,
    /// Daily end time of the coverage window. May be earlier than
    /// `start_time`, which means the window wraps past midnight.
    pub end_time: NaiveTime,
    /// Optional title; one is synthesized from the schedule when absent.
    pub title: Option<String>,
}
