//! Repository for the `prevention_messages` table.

use esante_core::messages::{DEFAULT_CATEGORY, MOTHER_VISIBLE_TARGETS, STATUS_PUBLISHED};
use esante_core::search::contains_pattern;
use esante_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::prevention_message::{
    CreateMessage, MessageFilter, MessageStats, PreventionMessage, UpdateMessage,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content, category, status, target, author_id, scheduled_at, \
                        published_at, views_count, created_at, updated_at";

/// `$1` status, `$2` category, `$3` ILIKE pattern.
const FILTER: &str = "($1::TEXT IS NULL OR status = $1) \
                      AND ($2::TEXT IS NULL OR category = $2) \
                      AND ($3::TEXT IS NULL \
                           OR title ILIKE $3 ESCAPE '\\' \
                           OR content ILIKE $3 ESCAPE '\\')";

/// Provides CRUD operations for prevention messages.
pub struct PreventionMessageRepo;

impl PreventionMessageRepo {
    /// Insert a message. Missing category, status and target fall back to
    /// the column defaults.
    pub async fn create(
        pool: &PgPool,
        author_id: Option<DbId>,
        input: &CreateMessage,
        published_at: Option<Timestamp>,
    ) -> Result<PreventionMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO prevention_messages
                (title, content, category, status, target, author_id, scheduled_at, published_at)
             VALUES ($1, $2, $3, COALESCE($4, 'draft'), COALESCE($5, 'all'),
                     $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PreventionMessage>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.category.as_deref().unwrap_or(DEFAULT_CATEGORY))
            .bind(&input.status)
            .bind(&input.target)
            .bind(author_id)
            .bind(input.scheduled_at)
            .bind(published_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PreventionMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prevention_messages WHERE id = $1");
        sqlx::query_as::<_, PreventionMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a message and count the read in one statement.
    pub async fn record_view(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PreventionMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE prevention_messages SET views_count = views_count + 1
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PreventionMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Messages matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &MessageFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PreventionMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prevention_messages WHERE {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, PreventionMessage>(&query)
            .bind(&filter.status)
            .bind(&filter.category)
            .bind(filter.search.as_deref().map(contains_pattern))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &MessageFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM prevention_messages WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.status)
            .bind(&filter.category)
            .bind(filter.search.as_deref().map(contains_pattern))
            .fetch_one(pool)
            .await
    }

    pub async fn stats(pool: &PgPool) -> Result<MessageStats, sqlx::Error> {
        sqlx::query_as::<_, MessageStats>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'published') AS published,
                COUNT(*) FILTER (WHERE status = 'draft') AS draft,
                COUNT(*) FILTER (WHERE status = 'scheduled') AS scheduled,
                COALESCE(SUM(views_count), 0)::BIGINT AS total_views
             FROM prevention_messages",
        )
        .fetch_one(pool)
        .await
    }

    /// Published messages a mother may read, newest first.
    pub async fn list_for_mothers(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<PreventionMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prevention_messages
             WHERE status = $1 AND target = ANY($2)
             ORDER BY published_at DESC NULLS LAST, created_at DESC, id DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, PreventionMessage>(&query)
            .bind(STATUS_PUBLISHED)
            .bind(MOTHER_VISIBLE_TARGETS.to_vec())
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a message. Only non-`None` fields in `input` are applied;
    /// `published_at` is only written when the row has none yet.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMessage,
        published_at: Option<Timestamp>,
    ) -> Result<Option<PreventionMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE prevention_messages SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                category = COALESCE($4, category),
                status = COALESCE($5, status),
                target = COALESCE($6, target),
                scheduled_at = COALESCE($7, scheduled_at),
                published_at = COALESCE(published_at, $8)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PreventionMessage>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(&input.status)
            .bind(&input.target)
            .bind(input.scheduled_at)
            .bind(published_at)
            .fetch_optional(pool)
            .await
    }

    /// Mark a message published. The first call stamps `published_at`;
    /// later calls leave it untouched.
    pub async fn publish(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PreventionMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE prevention_messages SET
                status = $2,
                published_at = COALESCE(published_at, NOW())
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PreventionMessage>(&query)
            .bind(id)
            .bind(STATUS_PUBLISHED)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a message. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prevention_messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
