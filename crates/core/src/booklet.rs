//! Health-booklet rules: owner resolution and the enumerations used by
//! booklet entries.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::qr::STATUS_VALIDATED;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Owner resolution
// ---------------------------------------------------------------------------

/// Why a booklet owner could not be resolved from a QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerMissing {
    UnknownCode,
    CardNotValidated,
    NoMother,
}

impl OwnerMissing {
    pub fn message(self) -> &'static str {
        match self {
            OwnerMissing::UnknownCode => "Invalid or unknown QR code",
            OwnerMissing::CardNotValidated => "This card has not been activated yet",
            OwnerMissing::NoMother => "No mother is attached to this QR code",
        }
    }
}

/// Message used when a mother has no pregnancy in progress.
pub const NO_CURRENT_PREGNANCY: &str = "No pregnancy in progress";

/// Result of resolving a booklet owner (mother) and her current pregnancy.
#[derive(Debug, Clone, PartialEq)]
pub enum BookletLookup<M, P> {
    Found { mother: M, pregnancy: P },
    OwnerNotFound(OwnerMissing),
    ChildNotFound { mother: M },
}

impl<M, P> BookletLookup<M, P> {
    /// Combine the outcome of the individual lookups.
    ///
    /// `card_status` is `None` when no card matched the code. The card must
    /// be validated and carry a mother before the pregnancy is considered.
    pub fn resolve(card_status: Option<&str>, mother: Option<M>, pregnancy: Option<P>) -> Self {
        match card_status {
            None => return BookletLookup::OwnerNotFound(OwnerMissing::UnknownCode),
            Some(status) if status != STATUS_VALIDATED => {
                return BookletLookup::OwnerNotFound(OwnerMissing::CardNotValidated)
            }
            Some(_) => {}
        }
        match (mother, pregnancy) {
            (None, _) => BookletLookup::OwnerNotFound(OwnerMissing::NoMother),
            (Some(mother), Some(pregnancy)) => BookletLookup::Found { mother, pregnancy },
            (Some(mother), None) => BookletLookup::ChildNotFound { mother },
        }
    }

    /// The mother, whether or not a pregnancy is in progress.
    pub fn into_mother(self) -> Result<M, CoreError> {
        match self {
            BookletLookup::Found { mother, .. } | BookletLookup::ChildNotFound { mother } => {
                Ok(mother)
            }
            BookletLookup::OwnerNotFound(why) => Err(CoreError::Missing(why.message().into())),
        }
    }

    /// The mother together with her current pregnancy.
    pub fn into_current(self) -> Result<(M, P), CoreError> {
        match self {
            BookletLookup::Found { mother, pregnancy } => Ok((mother, pregnancy)),
            BookletLookup::ChildNotFound { .. } => {
                Err(CoreError::Missing(NO_CURRENT_PREGNANCY.into()))
            }
            BookletLookup::OwnerNotFound(why) => Err(CoreError::Missing(why.message().into())),
        }
    }

    /// Split into mother and optional pregnancy.
    pub fn into_parts(self) -> Result<(M, Option<P>), CoreError> {
        match self {
            BookletLookup::Found { mother, pregnancy } => Ok((mother, Some(pregnancy))),
            BookletLookup::ChildNotFound { mother } => Ok((mother, None)),
            BookletLookup::OwnerNotFound(why) => Err(CoreError::Missing(why.message().into())),
        }
    }
}

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

fn check_one_of(kind: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {kind} '{value}'. Must be one of: {allowed:?}"
        )))
    }
}

/// Child sex codes.
pub mod sexe {
    pub const MALE: &str = "M";
    pub const FEMALE: &str = "F";
    pub const ALL: &[&str] = &[MALE, FEMALE];
}

/// Medical history categories.
pub mod history_type {
    pub const MEDICAL: &str = "medical";
    pub const CHIRURGICAL: &str = "chirurgical";
    pub const FAMILIAL: &str = "familial";
    pub const ALLERGIE: &str = "allergie";
    pub const ALL: &[&str] = &[MEDICAL, CHIRURGICAL, FAMILIAL, ALLERGIE];
}

/// Medical exam categories.
pub mod exam_type {
    pub const ECHOGRAPHIE: &str = "echographie";
    pub const ANALYSE_SANG: &str = "analyse_sang";
    pub const ANALYSE_URINE: &str = "analyse_urine";
    pub const AUTRE: &str = "autre";
    pub const ALL: &[&str] = &[ECHOGRAPHIE, ANALYSE_SANG, ANALYSE_URINE, AUTRE];
}

/// Appointment categories.
pub mod appointment_type {
    pub const CPN: &str = "cpn";
    pub const VACCINATION: &str = "vaccination";
    pub const ECHOGRAPHIE: &str = "echographie";
    pub const ANALYSE: &str = "analyse";
    pub const AUTRE: &str = "autre";
    pub const ALL: &[&str] = &[CPN, VACCINATION, ECHOGRAPHIE, ANALYSE, AUTRE];
}

/// Appointment lifecycle.
pub mod appointment_status {
    pub const PLANIFIE: &str = "planifie";
    pub const CONFIRME: &str = "confirme";
    pub const EFFECTUE: &str = "effectue";
    pub const ANNULE: &str = "annule";
    pub const MANQUE: &str = "manque";
    pub const ALL: &[&str] = &[PLANIFIE, CONFIRME, EFFECTUE, ANNULE, MANQUE];
}

pub fn validate_sexe(value: &str) -> Result<(), CoreError> {
    check_one_of("sexe", value, sexe::ALL)
}

pub fn validate_history_type(value: &str) -> Result<(), CoreError> {
    check_one_of("medical history type", value, history_type::ALL)
}

pub fn validate_exam_type(value: &str) -> Result<(), CoreError> {
    check_one_of("exam type", value, exam_type::ALL)
}

pub fn validate_appointment_type(value: &str) -> Result<(), CoreError> {
    check_one_of("appointment type", value, appointment_type::ALL)
}

pub fn validate_appointment_status(value: &str) -> Result<(), CoreError> {
    check_one_of("appointment status", value, appointment_status::ALL)
}

// ---------------------------------------------------------------------------
// Presentation helpers
// ---------------------------------------------------------------------------

/// Group medical history entries by category. Every known category is
/// present in the result, possibly empty; unknown categories are dropped.
pub fn group_histories<T>(
    items: Vec<T>,
    kind_of: impl Fn(&T) -> &str,
) -> BTreeMap<String, Vec<T>> {
    let mut grouped: BTreeMap<String, Vec<T>> = history_type::ALL
        .iter()
        .map(|k| (k.to_string(), Vec::new()))
        .collect();
    for item in items {
        if let Some(bucket) = grouped.get_mut(kind_of(&item)) {
            bucket.push(item);
        }
    }
    grouped
}

/// An appointment on or after `today` is upcoming.
pub fn is_upcoming(date: Date, today: Date) -> bool {
    date >= today
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    type Lookup = BookletLookup<&'static str, i32>;

    #[test]
    fn unknown_code_wins_over_everything() {
        let l = Lookup::resolve(None, Some("awa"), Some(1));
        assert_matches!(l, BookletLookup::OwnerNotFound(OwnerMissing::UnknownCode));
    }

    #[test]
    fn pending_card_is_not_resolved() {
        let l = Lookup::resolve(Some("pending"), Some("awa"), Some(1));
        assert_matches!(
            l,
            BookletLookup::OwnerNotFound(OwnerMissing::CardNotValidated)
        );
    }

    #[test]
    fn validated_card_without_mother() {
        let l = Lookup::resolve(Some("validated"), None, None);
        assert_matches!(l, BookletLookup::OwnerNotFound(OwnerMissing::NoMother));
    }

    #[test]
    fn mother_without_pregnancy_is_child_not_found() {
        let l = Lookup::resolve(Some("validated"), Some("awa"), None);
        assert_matches!(l.clone(), BookletLookup::ChildNotFound { mother: "awa" });
        assert_eq!(l.clone().into_mother().unwrap(), "awa");
        assert_matches!(l.into_current(), Err(CoreError::Missing(_)));
    }

    #[test]
    fn found_yields_both() {
        let l = Lookup::resolve(Some("validated"), Some("awa"), Some(2));
        assert_eq!(l.into_current().unwrap(), ("awa", 2));
    }

    #[test]
    fn histories_are_grouped_with_empty_buckets() {
        let items = vec![("allergie", 1), ("medical", 2), ("allergie", 3), ("bogus", 4)];
        let grouped = group_histories(items, |(k, _)| *k);
        assert_eq!(grouped.len(), 4);
        assert_eq!(grouped["allergie"].len(), 2);
        assert_eq!(grouped["medical"].len(), 1);
        assert!(grouped["familial"].is_empty());
    }

    #[test]
    fn enum_validators() {
        assert!(validate_sexe("F").is_ok());
        assert!(validate_sexe("X").is_err());
        assert!(validate_exam_type("echographie").is_ok());
        assert!(validate_appointment_status("annule").is_ok());
        assert!(validate_appointment_type("dentiste").is_err());
        assert!(validate_history_type("familial").is_ok());
    }

    #[test]
    fn today_counts_as_upcoming() {
        let d = Date::from_ymd_opt(2026, 5, 1).unwrap();
        assert!(is_upcoming(d, d));
        assert!(!is_upcoming(d, d.succ_opt().unwrap()));
    }
}
