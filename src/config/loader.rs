//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::Holiday;

use super::types::{EngineConfig, PayrollDefaults};

/// Loads and provides access to the engine configuration.
///
/// # File format
///
/// ```yaml
/// payroll:
///   regular_rate: "15"
///   overtime_multiplier: "1.5"
/// holidays:
///   - date: 2026-12-25
///     name: Christmas Day
///     multiplier: "2.0"
/// ```
///
/// # Example
///
/// ```no_run
/// use care_shift_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine.yaml").unwrap();
/// println!("default rate: {}", loader.defaults().regular_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] when the file does not exist.
    /// - [`EngineError::ConfigParseError`] when the YAML is malformed or
    ///   the values fail validation (non-positive default rate, overtime
    ///   multiplier or holiday multiplier below 1.0).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EngineError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|err| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let config: EngineConfig =
            serde_yaml::from_str(&raw).map_err(|err| EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
        Self::validate(&config).map_err(|message| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message,
        })?;
        Ok(ConfigLoader { config })
    }

    /// Wraps an already-built configuration, validating it the same way
    /// as [`ConfigLoader::load`]. Useful for tests.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        Self::validate(&config).map_err(|message| EngineError::ConfigParseError {
            path: "<inline>".to_string(),
            message,
        })?;
        Ok(ConfigLoader { config })
    }

    fn validate(config: &EngineConfig) -> Result<(), String> {
        if config.payroll.regular_rate <= Decimal::ZERO {
            return Err("payroll.regular_rate must be positive".to_string());
        }
        if config.payroll.overtime_multiplier < Decimal::ONE {
            return Err("payroll.overtime_multiplier must be at least 1.0".to_string());
        }
        for holiday in &config.holidays {
            if holiday.multiplier < Decimal::ONE {
                return Err(format!(
                    "holiday '{}' has multiplier below 1.0",
                    holiday.name
                ));
            }
        }
        Ok(())
    }

    /// Returns the payroll rate defaults.
    pub fn defaults(&self) -> PayrollDefaults {
        self.config.payroll
    }

    /// Returns the holidays to seed the calendar with.
    pub fn holidays(&self) -> &[Holiday] {
        &self.config.holidays
    }
}
