//! Application state for the care shift engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, PayrollDefaults};
use crate::error::EngineResult;
use crate::store::EngineStore;

/// Shared application state.
///
/// Holds the backing store and the payroll rate defaults. Team-member
/// roster records and additional holidays are seeded through
/// [`AppState::store`] by the surrounding application; the engine only
/// reads them back.
#[derive(Clone)]
pub struct AppState {
    store: Arc<EngineStore>,
    defaults: PayrollDefaults,
}

impl AppState {
    /// Creates application state from loaded configuration, seeding the
    /// holiday calendar from the config file.
    pub fn new(config: &ConfigLoader) -> EngineResult<Self> {
        let store = EngineStore::new();
        for holiday in config.holidays() {
            store.add_holiday(holiday.clone())?;
        }
        Ok(Self {
            store: Arc::new(store),
            defaults: config.defaults(),
        })
    }

    /// Returns the backing store.
    pub fn store(&self) -> &EngineStore {
        &self.store
    }

    /// Returns the payroll rate defaults.
    pub fn defaults(&self) -> &PayrollDefaults {
        &self.defaults
    }
}
