//! Scheduling logic for the care shift engine.
//!
//! This module turns abstract coverage requirements into concrete,
//! assignable shifts: resolving a weekday set to its next calendar
//! occurrence, combining dates with times of day, correcting overnight
//! wraparound, and expanding recurring templates into shift rows.

mod generator;
mod time_resolution;

pub use generator::{GenerationOutcome, SkippedDefinition, generate_from_definitions};
pub use time_resolution::{
    combine, correct_overnight, next_occurrence, parse_time_of_day, parse_weekday, weekday_name,
};
