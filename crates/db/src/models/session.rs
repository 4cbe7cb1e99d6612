//! Refresh-token session model and DTOs.

use esante_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
///
/// Exactly one of `user_id` / `mother_id` is set (enforced by a check
/// constraint).
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub mother_id: Option<DbId>,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Who a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOwner {
    User(DbId),
    Mother(DbId),
}

impl Session {
    pub fn owner(&self) -> Option<SessionOwner> {
        match (self.user_id, self.mother_id) {
            (Some(id), None) => Some(SessionOwner::User(id)),
            (None, Some(id)) => Some(SessionOwner::Mother(id)),
            _ => None,
        }
    }
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub owner: SessionOwner,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
