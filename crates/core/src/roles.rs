//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in
//! `20260301000002_create_users.sql`.

use crate::error::CoreError;

/// Ministry staff: manage users, centers, messages and national statistics.
pub const ROLE_MINISTRY: &str = "MINISTRY";
/// Field staff: validate QR cards and maintain mothers' booklets.
pub const ROLE_HEALTH_WORKER: &str = "HEALTH_WORKER";

pub const VALID_ROLES: &[&str] = &[ROLE_MINISTRY, ROLE_HEALTH_WORKER];

/// Validate that a role string is one of the known roles.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {VALID_ROLES:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_pass() {
        assert!(validate_role(ROLE_MINISTRY).is_ok());
        assert!(validate_role(ROLE_HEALTH_WORKER).is_ok());
    }

    #[test]
    fn role_check_is_case_sensitive() {
        assert!(validate_role("ministry").is_err());
        assert!(validate_role("ADMIN").is_err());
    }
}
