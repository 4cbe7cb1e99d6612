//! Prevention message categories, audiences and publish lifecycle.

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_SCHEDULED: &str = "scheduled";

pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_PUBLISHED, STATUS_SCHEDULED];

// ---------------------------------------------------------------------------
// Category and target audience
// ---------------------------------------------------------------------------

pub const VALID_CATEGORIES: &[&str] = &["vaccination", "prenatal", "nutrition", "info", "urgence"];

/// Default category for new messages.
pub const DEFAULT_CATEGORY: &str = "info";

pub const TARGET_ALL: &str = "all";
pub const TARGET_MOTHERS: &str = "mothers";
pub const TARGET_AGENTS: &str = "agents";

pub const VALID_TARGETS: &[&str] = &[TARGET_ALL, TARGET_MOTHERS, TARGET_AGENTS];

/// Audiences whose messages are shown in the mothers' mobile app.
pub const MOTHER_VISIBLE_TARGETS: &[&str] = &[TARGET_ALL, TARGET_MOTHERS];

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid message status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid message category '{category}'. Must be one of: {VALID_CATEGORIES:?}"
        )))
    }
}

pub fn validate_target(target: &str) -> Result<(), CoreError> {
    if VALID_TARGETS.contains(&target) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid message target '{target}'. Must be one of: {VALID_TARGETS:?}"
        )))
    }
}

/// The `published_at` value a message should carry after a write.
///
/// The first transition to `published` stamps `now`; an existing stamp is
/// never replaced.
pub fn published_stamp(
    status: &str,
    existing: Option<Timestamp>,
    now: Timestamp,
) -> Option<Timestamp> {
    match existing {
        Some(stamp) => Some(stamp),
        None if status == STATUS_PUBLISHED => Some(now),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn first_publish_stamps_now() {
        let now = Utc::now();
        assert_eq!(published_stamp(STATUS_PUBLISHED, None, now), Some(now));
    }

    #[test]
    fn existing_stamp_is_kept() {
        let earlier = Utc::now() - Duration::days(3);
        let now = Utc::now();
        assert_eq!(
            published_stamp(STATUS_PUBLISHED, Some(earlier), now),
            Some(earlier)
        );
    }

    #[test]
    fn drafts_are_not_stamped() {
        assert_eq!(published_stamp(STATUS_DRAFT, None, Utc::now()), None);
        assert_eq!(published_stamp(STATUS_SCHEDULED, None, Utc::now()), None);
    }

    #[test]
    fn validators_reject_unknown_values() {
        assert!(validate_status("archived").is_err());
        assert!(validate_category("nutrition").is_ok());
        assert!(validate_category("sport").is_err());
        assert!(validate_target("agents").is_ok());
        assert!(validate_target("fathers").is_err());
    }
}
