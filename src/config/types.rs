//! Configuration types for the care shift engine.
//!
//! These structures are deserialized from the engine's YAML configuration
//! file.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::Holiday;

/// Fallback pay rates applied when a care team member record carries no
/// explicit rate.
///
/// The historical behaviour hard-coded 15.0 currency units per hour and a
/// 1.5x overtime multiplier; those values are the defaults here but are
/// injected into the calculator rather than read at the use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PayrollDefaults {
    /// Hourly rate used when a member has no `regular_rate`.
    pub regular_rate: Decimal,
    /// Multiplier applied to the regular rate when a member has no
    /// `overtime_rate`.
    pub overtime_multiplier: Decimal,
}

impl Default for PayrollDefaults {
    fn default() -> Self {
        PayrollDefaults {
            regular_rate: Decimal::new(15, 0),
            overtime_multiplier: Decimal::new(15, 1),
        }
    }
}

/// Top-level engine configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Payroll rate defaults.
    #[serde(default)]
    pub payroll: PayrollDefaults,
    /// Holidays seeded into the calendar at startup.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}
