//! Care team member model.
//!
//! A care team member links a caregiver to a care plan and carries the
//! caregiver-specific pay rates used by the payroll calculator. Membership
//! records are owned by plan coordination; this engine only reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a team membership is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// The member may be assigned shifts and log work.
    Active,
    /// The member left the team; assignment attempts are rejected.
    Inactive,
}

/// A caregiver's membership record within a specific care plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareTeamMember {
    /// Unique identifier for the membership record.
    pub id: Uuid,
    /// The care plan the caregiver belongs to.
    pub care_plan_id: Uuid,
    /// The caregiver this membership is for.
    pub caregiver_id: Uuid,
    /// Role within the team (e.g. "primary caregiver").
    pub role: String,
    /// Agreed regular hourly rate; the configured default applies when unset.
    pub regular_rate: Option<Decimal>,
    /// Agreed overtime hourly rate; regular rate times the configured
    /// overtime multiplier applies when unset.
    pub overtime_rate: Option<Decimal>,
    /// Active/inactive status of the membership.
    pub status: MemberStatus,
}

impl CareTeamMember {
    /// Returns true if the membership is active.
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}
