//! Prevention message model and DTOs.

use esante_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `prevention_messages` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PreventionMessage {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: String,
    pub target: String,
    pub author_id: Option<DbId>,
    pub scheduled_at: Option<Timestamp>,
    pub published_at: Option<Timestamp>,
    pub views_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateMessage {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub status: Option<String>,
    pub target: Option<String>,
    pub scheduled_at: Option<Timestamp>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMessage {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub target: Option<String>,
    pub scheduled_at: Option<Timestamp>,
}

#[derive(Debug, Default)]
pub struct MessageFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    /// Case-insensitive substring of the title or content.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MessageStats {
    pub total: i64,
    pub published: i64,
    pub draft: i64,
    pub scheduled: i64,
    pub total_views: i64,
}
