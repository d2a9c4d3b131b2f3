//! Request types for the care shift engine API.
//!
//! This module defines the JSON request structures for the shift,
//! work-log, expense and payroll endpoints. Where a wire type carries
//! weekday names or `"HH:MM"` strings, the conversion into domain types
//! goes through the scheduling parsers so malformed input surfaces as a
//! validation error rather than a serde rejection.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    ExpenseCategory, ExpenseStatus, NewExpense, NewShift, ShiftDefinition, ShiftStatus, ShiftUpdate,
};
use crate::scheduling::{parse_time_of_day, parse_weekday};

/// Deserializes a field that distinguishes "absent" (`None`) from
/// "explicitly null" (`Some(None)`). Must be paired with
/// `#[serde(default)]` so absence stays `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Request body for `POST /care-plans/{plan_id}/shifts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShiftRequest {
    /// The family the care plan belongs to.
    pub family_id: Uuid,
    /// Optional caregiver to assign immediately.
    #[serde(default)]
    pub caregiver_id: Option<Uuid>,
    /// Short human-readable title.
    pub title: String,
    /// Free-form description of the coverage.
    #[serde(default)]
    pub description: String,
    /// Where the care takes place.
    #[serde(default)]
    pub location: Option<String>,
    /// When coverage starts.
    pub start_time: NaiveDateTime,
    /// When coverage ends.
    pub end_time: NaiveDateTime,
    /// Free-form day list tag for recurring shifts.
    #[serde(default)]
    pub recurring_pattern: Option<String>,
    /// Reference into an external calendar.
    #[serde(default)]
    pub calendar_event_ref: Option<String>,
}

impl CreateShiftRequest {
    /// Combines the body with the path's care plan id into creation input.
    pub fn into_new_shift(self, care_plan_id: Uuid) -> NewShift {
        NewShift {
            care_plan_id,
            family_id: self.family_id,
            caregiver_id: self.caregiver_id,
            title: self.title,
            description: self.description,
            location: self.location,
            start_time: self.start_time,
            end_time: self.end_time,
            recurring_pattern: self.recurring_pattern,
            calendar_event_ref: self.calendar_event_ref,
        }
    }
}

/// Request body for `PATCH /shifts/{id}`. Absent fields are untouched;
/// `caregiver_id` may additionally be `null` to clear the assignment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateShiftRequest {
    /// New title, if changing.
    #[serde(default)]
    pub title: Option<String>,
    /// New description, if changing.
    #[serde(default)]
    pub description: Option<String>,
    /// New location, if changing.
    #[serde(default)]
    pub location: Option<String>,
    /// Set or clear (explicit `null`) the assigned caregiver.
    #[serde(default, deserialize_with = "double_option")]
    pub caregiver_id: Option<Option<Uuid>>,
    /// Explicit terminal status (`completed` or `cancelled`).
    #[serde(default)]
    pub status: Option<ShiftStatus>,
    /// New start timestamp, if changing.
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    /// New end timestamp, if changing.
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    /// New recurring-pattern tag, if changing.
    #[serde(default)]
    pub recurring_pattern: Option<String>,
    /// New external-calendar reference, if changing.
    #[serde(default)]
    pub calendar_event_ref: Option<String>,
}

impl From<UpdateShiftRequest> for ShiftUpdate {
    fn from(req: UpdateShiftRequest) -> Self {
        ShiftUpdate {
            title: req.title,
            description: req.description,
            location: req.location,
            caregiver_id: req.caregiver_id,
            status: req.status,
            start_time: req.start_time,
            end_time: req.end_time,
            recurring_pattern: req.recurring_pattern,
            calendar_event_ref: req.calendar_event_ref,
        }
    }
}

/// One recurring template in a generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftDefinitionRequest {
    /// Lowercase weekday names (e.g. `["monday", "wednesday"]`).
    pub days: Vec<String>,
    /// Daily start of the coverage window, `"HH:MM"`.
    pub start_time: String,
    /// Daily end of the coverage window, `"HH:MM"`. Earlier than the
    /// start means the window wraps past midnight.
    pub end_time: String,
    /// Optional title; synthesized from the schedule when absent.
    #[serde(default)]
    pub title: Option<String>,
}

impl ShiftDefinitionRequest {
    /// Parses the wire form into a domain template.
    ///
    /// # Errors
    ///
    /// [`crate::error::EngineError::TimeParse`] on an unknown weekday
    /// name or a malformed time-of-day string.
    pub fn into_definition(self) -> EngineResult<ShiftDefinition> {
        let days = self
            .days
            .iter()
            .map(|d| parse_weekday(d))
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(ShiftDefinition {
            days,
            start_time: parse_time_of_day(&self.start_time)?,
            end_time: parse_time_of_day(&self.end_time)?,
            title: self.title,
        })
    }
}

/// Request body for `POST /care-plans/{plan_id}/shifts/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateShiftsRequest {
    /// The family the care plan belongs to.
    pub family_id: Uuid,
    /// The templates to expand.
    pub definitions: Vec<ShiftDefinitionRequest>,
    /// Reference date for next-occurrence resolution. Defaults to the
    /// current date when absent.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

/// Request body for `POST /work-logs`.
///
/// Either a full explicit record, or just a `shift_id` to derive the
/// times, plan and team member from an assigned shift.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CreateWorkLogRequest {
    /// Explicit values for every field.
    Explicit {
        /// The team membership of the caregiver who worked.
        team_member_id: Uuid,
        /// The care plan the work was performed under.
        care_plan_id: Uuid,
        /// Optional shift the work was performed against.
        #[serde(default)]
        shift_id: Option<Uuid>,
        /// When the work started.
        start_time: NaiveDateTime,
        /// When the work ended.
        end_time: NaiveDateTime,
        /// Unpaid break in minutes.
        #[serde(default)]
        break_minutes: i64,
        /// Free-form notes.
        #[serde(default)]
        notes: String,
    },
    /// Derive times, plan and member from the referenced shift.
    FromShift {
        /// The shift to log work against. Must have an assigned caregiver.
        shift_id: Uuid,
        /// Unpaid break in minutes.
        #[serde(default)]
        break_minutes: i64,
        /// Free-form notes.
        #[serde(default)]
        notes: String,
    },
}

/// Request body for `POST /work-logs/{id}/reject`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RejectWorkLogRequest {
    /// Optional reason, appended to the log's notes.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request body for `POST /work-logs/{id}/expenses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    /// Expense category.
    pub category: ExpenseCategory,
    /// Non-negative amount in currency units.
    pub amount: Decimal,
    /// What the expense was for.
    #[serde(default)]
    pub description: String,
    /// Reference to an uploaded receipt, if one exists.
    #[serde(default)]
    pub receipt_ref: Option<String>,
}

impl CreateExpenseRequest {
    /// Combines the body with the path's work log id into creation input.
    pub fn into_new_expense(self, work_log_id: Uuid) -> NewExpense {
        NewExpense {
            work_log_id,
            category: self.category,
            amount: self.amount,
            description: self.description,
            receipt_ref: self.receipt_ref,
        }
    }
}

/// Request body for `POST /expenses/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseStatusRequest {
    /// Target status; only `approved` and `rejected` are accepted.
    pub status: ExpenseStatus,
}

/// Request body for `POST /payroll/{id}/pay`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessPaymentRequest {
    /// Date the payment went out. Defaults to the current date.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
}

/// Query parameters for `GET /care-plans/{plan_id}/shifts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListShiftsQuery {
    /// Assignment-state filter: `all`, `assigned`, `unassigned` or
    /// `completed`. Defaults to `all`.
    #[serde(default)]
    pub filter: Option<String>,
}
