//! Work log expense model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Category of a reimbursable expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Medical supplies purchased for the care recipient.
    MedicalSupplies,
    /// Food bought during the shift.
    Food,
    /// Travel costs.
    Transportation,
    /// Anything else.
    Other,
}

/// Approval state of an expense. Managed independently of the owning
/// work log's approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseStatus {
    /// Awaiting coordinator review.
    Pending,
    /// Counts toward the payroll expense total.
    Approved,
    /// Excluded from payroll.
    Rejected,
}

/// An itemized reimbursable cost tied to one work log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLogExpense {
    /// Unique identifier for the expense.
    pub id: Uuid,
    /// The work log this expense belongs to.
    pub work_log_id: Uuid,
    /// Expense category.
    pub category: ExpenseCategory,
    /// Non-negative amount in currency units.
    pub amount: Decimal,
    /// What the expense was for.
    pub description: String,
    /// Reference to an uploaded receipt, if one exists.
    pub receipt_ref: Option<String>,
    /// Approval state.
    pub status: ExpenseStatus,
}

/// Input for attaching an expense to a work log.
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// The work log this expense belongs to.
    pub work_log_id: Uuid,
    /// Expense category.
    pub category: ExpenseCategory,
    /// Non-negative amount in currency units.
    pub amount: Decimal,
    /// What the expense was for.
    pub description: String,
    /// Reference to an uploaded receipt, if one exists.
    pub receipt_ref: Option<String>,
}

impl WorkLogExpense {
    /// Builds a pending expense from creation input.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] when the amount is negative.
    pub fn from_new(new: NewExpense) -> EngineResult<Self> {
        if new.amount < Decimal::ZERO {
            return Err(EngineError::validation("expense amount must not be negative"));
        }
        Ok(WorkLogExpense {
            id: Uuid::new_v4(),
            work_log_id: new.work_log_id,
            category: new.category,
            amount: new.amount,
            description: new.description,
            receipt_ref: new.receipt_ref,
            status: ExpenseStatus::Pending,
        })
    }
}
