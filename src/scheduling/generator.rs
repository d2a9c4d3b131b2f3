//! Shift generation from recurring coverage templates.
//!
//! Expands [`ShiftDefinition`]s into concrete open shifts. Each definition
//! is processed independently: a storage failure on one definition is
//! logged and recorded in the outcome, and generation continues with the
//! rest (partial success, never all-or-nothing).

use chrono::NaiveDate;
use tracing::warn;
use uuid::Uuid;

use crate::models::{NewShift, Shift, ShiftDefinition};
use crate::scheduling::time_resolution::{combine, correct_overnight, next_occurrence, weekday_name};
use crate::store::EngineStore;

/// A definition that could not be turned into a shift, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedDefinition {
    /// The definition that was skipped.
    pub definition: ShiftDefinition,
    /// Human-readable description of the failure.
    pub error: String,
}

/// The result of a batch generation run: the shifts that were created and
/// the definitions that had to be skipped.
#[derive(Debug, Default)]
pub struct GenerationOutcome {
    /// Shifts persisted successfully, in definition order.
    pub created: Vec<Shift>,
    /// Definitions skipped because persisting their shift failed.
    pub skipped: Vec<SkippedDefinition>,
}

/// Expands custom shift definitions into concrete open shifts.
///
/// For each definition the next occurrence of its weekday set is resolved
/// relative to `today`, start/end timestamps are built from the daily time
/// window (with overnight correction when the window wraps midnight), a
/// title is synthesized when the definition does not carry one, and a new
/// shift is persisted with status `Open` and a `recurring_pattern` tag
/// equal to the comma-joined weekday list.
///
/// Definitions with an empty weekday set are skipped (there is nothing to
/// resolve), as are definitions whose shift fails to persist.
pub fn generate_from_definitions(
    store: &EngineStore,
    care_plan_id: Uuid,
    family_id: Uuid,
    definitions: Vec<ShiftDefinition>,
    today: NaiveDate,
) -> GenerationOutcome {
    let mut outcome = GenerationOutcome::default();

    for definition in definitions {
        if definition.days.is_empty() {
            warn!(plan = %care_plan_id, "skipping shift definition with empty weekday set");
            outcome.skipped.push(SkippedDefinition {
                definition,
                error: "weekday set is empty".to_string(),
            });
            continue;
        }

        let date = next_occurrence(&definition.days, today);
        let start_time = combine(date, definition.start_time);
        let end_time = correct_overnight(start_time, combine(date, definition.end_time));

        let day_list = definition
            .days
            .iter()
            .map(|d| weekday_name(*d))
            .collect::<Vec<_>>()
            .join(", ");
        let pattern = definition
            .days
            .iter()
            .map(|d| weekday_name(*d))
            .collect::<Vec<_>>()
            .join(",");
        let window = format!(
            "{}-{}",
            definition.start_time.format("%H:%M"),
            definition.end_time.format("%H:%M")
        );

        let title = definition
            .title
            .clone()
            .unwrap_or_else(|| format!("{} {}", day_list, window));
        let description = format!("Recurring care coverage on {} ({})", day_list, window);

        let new_shift = NewShift {
            care_plan_id,
            family_id,
            caregiver_id: None,
            title,
            description,
            location: None,
            start_time,
            end_time,
            recurring_pattern: Some(pattern),
            calendar_event_ref: None,
        };

        match store.create_shift(new_shift) {
            Ok(shift) => outcome.created.push(shift),
            Err(err) => {
                warn!(plan = %care_plan_id, error = %err, "failed to persist generated shift, skipping definition");
                outcome.skipped.push(SkippedDefinition {
                    definition,
                    error: err.to_string(),
                });
            }
        }
    }

    outcome
}
