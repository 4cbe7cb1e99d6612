//! Pregnancy status constants and gestational arithmetic.

use crate::error::CoreError;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Ongoing pregnancy; the most recent one is the booklet's "current" pregnancy.
pub const STATUS_EN_COURS: &str = "en_cours";
/// Pregnancy carried to term.
pub const STATUS_TERMINE: &str = "termine";
/// Pregnancy interrupted before term.
pub const STATUS_INTERROMPU: &str = "interrompu";

pub const VALID_STATUSES: &[&str] = &[STATUS_EN_COURS, STATUS_TERMINE, STATUS_INTERROMPU];

/// Validate that a pregnancy status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid pregnancy status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// Sequence number following `existing`, the count of pregnancies of a
/// mother or the highest CPN number of a pregnancy.
pub fn next_numero(existing: i64) -> i32 {
    i32::try_from(existing).unwrap_or(i32::MAX - 1) + 1
}

/// Completed weeks of amenorrhea on `today`, counted from the last
/// menstrual period.
///
/// `None` when the date is unknown or lies in the future.
pub fn current_week(last_period: Option<Date>, today: Date) -> Option<i64> {
    let days = (today - last_period?).num_days();
    (days >= 0).then_some(days / 7)
}
