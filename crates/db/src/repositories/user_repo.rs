//! Repository for the `users` table.

use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User, UserFilter, UserStats};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, badge_id, email, first_name, last_name, phone, role, \
                        health_center_id, password_hash, is_active, last_login_at, \
                        created_at, updated_at";

/// Shared `WHERE` clause for the directory listing and its count.
/// `$1` role, `$2` is_active, `$3` ILIKE pattern.
const FILTER: &str = "($1::TEXT IS NULL OR role = $1) \
                      AND ($2::BOOLEAN IS NULL OR is_active = $2) \
                      AND ($3::TEXT IS NULL \
                           OR first_name ILIKE $3 ESCAPE '\\' \
                           OR last_name ILIKE $3 ESCAPE '\\' \
                           OR email ILIKE $3 ESCAPE '\\' \
                           OR badge_id ILIKE $3 ESCAPE '\\')";

/// Provides CRUD operations for staff users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users
                (badge_id, email, first_name, last_name, phone, role, health_center_id, password_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.badge_id)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .bind(&input.role)
            .bind(input.health_center_id)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID. Inactive users are included.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by badge id, ignoring case.
    pub async fn find_by_badge(pool: &PgPool, badge_id: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(badge_id) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(badge_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email. Emails are stored lowercase.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Whether a badge id is already taken (case-insensitive).
    pub async fn badge_exists(pool: &PgPool, badge_id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(badge_id) = LOWER($1))",
        )
        .bind(badge_id)
        .fetch_one(pool)
        .await
    }

    /// List users matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &UserFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&filter.role)
            .bind(filter.is_active)
            .bind(filter.search.as_deref().map(esante_core::search::contains_pattern))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count users matching `filter`.
    pub async fn count(pool: &PgPool, filter: &UserFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM users WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.role)
            .bind(filter.is_active)
            .bind(filter.search.as_deref().map(esante_core::search::contains_pattern))
            .fetch_one(pool)
            .await
    }

    /// Head counts over the whole table, ignoring filters.
    pub async fn stats(pool: &PgPool) -> Result<UserStats, sqlx::Error> {
        sqlx::query_as::<_, UserStats>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE role = 'MINISTRY') AS ministry,
                COUNT(*) FILTER (WHERE role = 'HEALTH_WORKER') AS health_workers,
                COUNT(*) FILTER (WHERE is_active) AS active
             FROM users",
        )
        .fetch_one(pool)
        .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = COALESCE(LOWER($2), email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                phone = COALESCE($5, phone),
                role = COALESCE($6, role),
                health_center_id = COALESCE($7, health_center_id),
                is_active = COALESCE($8, is_active),
                password_hash = COALESCE($9, password_hash)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .bind(&input.role)
            .bind(input.health_center_id)
            .bind(input.is_active)
            .bind(&input.password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a user and revoke every session it holds.
    ///
    /// Returns `false` only when no user has this id; deactivating an
    /// already inactive account succeeds.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE sessions SET is_revoked = true
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Whether the account is active. `None` if no user has this id.
    pub async fn is_active(pool: &PgPool, id: DbId) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar("SELECT is_active FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `last_login_at` with the current time.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
