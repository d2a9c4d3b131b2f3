//! Domain models for the care shift engine.

mod expense;
mod holiday;
mod payroll_entry;
mod shift;
mod team_member;
mod work_log;

pub use expense::{ExpenseCategory, ExpenseStatus, NewExpense, WorkLogExpense};
pub use holiday::Holiday;
pub use payroll_entry::{PaymentStatus, PayrollEntry};
pub use shift::{NewShift, Shift, ShiftDefinition, ShiftStatus, ShiftUpdate};
pub use team_member::{CareTeamMember, MemberStatus};
pub use work_log::{NewWorkLog, WorkLog, WorkLogStatus};
