//! Engine configuration.
//!
//! Payroll rate defaults and the seed holiday calendar are configuration,
//! not hard-coded literals, so deployments and test suites can override
//! them.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, PayrollDefaults};
