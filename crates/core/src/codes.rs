//! Human-readable identifier generation (staff badges, QR card codes).
//!
//! Codes are `PREFIX-XXXXXXXX` with eight uppercase alphanumeric characters.
//! Uniqueness is enforced by the database; callers regenerate on conflict.

use rand::Rng;

/// Prefix of auto-generated staff badge ids.
pub const BADGE_PREFIX: &str = "AGENT";

/// Prefix of QR card codes.
pub const QR_CODE_PREFIX: &str = "QR";

/// Length of the random part of a generated code.
pub const CODE_SUFFIX_LENGTH: usize = 8;

/// How many candidates to try before giving up on finding a free code.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Generate `PREFIX-XXXXXXXX` with an uppercase alphanumeric suffix.
pub fn generate_code(prefix: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(CODE_SUFFIX_LENGTH)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("{prefix}-{suffix}")
}

/// Generate a candidate badge id (`AGENT-XXXXXXXX`).
pub fn generate_badge_id() -> String {
    generate_code(BADGE_PREFIX)
}

/// Generate a candidate QR card code (`QR-XXXXXXXX`).
pub fn generate_qr_code() -> String {
    generate_code(QR_CODE_PREFIX)
}
