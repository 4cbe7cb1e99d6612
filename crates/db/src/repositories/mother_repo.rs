//! Repository for the `mothers` table.

use esante_core::qr::STATUS_VALIDATED;
use esante_core::search::contains_pattern;
use esante_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::mother::{
    Mother, MotherFilter, MotherStats, MotherView, UpdateMother, UpsertMother,
};
use crate::models::qr_card::QrCard;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, qr_card_id, full_name, address, phone, birth_date, profession, \
                        center_id, created_at, updated_at";

/// Select list and joins producing a [`MotherView`].
const VIEW_SELECT: &str = "\
    SELECT m.id, m.qr_card_id, m.full_name, m.address, m.phone, m.birth_date, \
           m.profession, m.center_id, m.created_at, m.updated_at, \
           q.code AS qr_code, q.status AS qr_status, c.name AS center_name, \
           EXISTS(SELECT 1 FROM health_records r WHERE r.mother_id = m.id) AS has_record \
    FROM mothers m \
    JOIN qr_cards q ON q.id = m.qr_card_id \
    LEFT JOIN health_centers c ON c.id = m.center_id";

/// `$1` card status, `$2` center id, `$3` ILIKE pattern.
const FILTER: &str = "($1::TEXT IS NULL OR q.status = $1) \
                      AND ($2::BIGINT IS NULL OR m.center_id = $2) \
                      AND ($3::TEXT IS NULL \
                           OR m.full_name ILIKE $3 ESCAPE '\\' \
                           OR q.code ILIKE $3 ESCAPE '\\')";

/// Provides CRUD operations for mothers.
pub struct MotherRepo;

impl MotherRepo {
    /// Attach (or refresh) the mother of a card and mark the card validated,
    /// in one transaction.
    ///
    /// Re-validating overwrites the identity fields and leaves the card
    /// validated.
    pub async fn validate_card(
        pool: &PgPool,
        qr_card_id: DbId,
        input: &UpsertMother,
    ) -> Result<(QrCard, Mother), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO mothers
                (qr_card_id, full_name, address, phone, birth_date, profession, center_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (qr_card_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                address = EXCLUDED.address,
                phone = EXCLUDED.phone,
                birth_date = EXCLUDED.birth_date,
                profession = EXCLUDED.profession,
                center_id = COALESCE(EXCLUDED.center_id, mothers.center_id)
             RETURNING {COLUMNS}"
        );
        let mother = sqlx::query_as::<_, Mother>(&query)
            .bind(qr_card_id)
            .bind(&input.full_name)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(input.birth_date)
            .bind(&input.profession)
            .bind(input.center_id)
            .fetch_one(&mut *tx)
            .await?;

        let card = sqlx::query_as::<_, QrCard>(
            "UPDATE qr_cards SET status = $2 WHERE id = $1
             RETURNING id, code, status, image_path, center_name, center_city, \
                       created_at, updated_at",
        )
        .bind(qr_card_id)
        .bind(STATUS_VALIDATED)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((card, mother))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Mother>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mothers WHERE id = $1");
        sqlx::query_as::<_, Mother>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The mother attached to a card, if any.
    pub async fn find_by_qr_card(
        pool: &PgPool,
        qr_card_id: DbId,
    ) -> Result<Option<Mother>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mothers WHERE qr_card_id = $1");
        sqlx::query_as::<_, Mother>(&query)
            .bind(qr_card_id)
            .fetch_optional(pool)
            .await
    }

    /// Mother with her card and center details.
    pub async fn find_view(pool: &PgPool, id: DbId) -> Result<Option<MotherView>, sqlx::Error> {
        let query = format!("{VIEW_SELECT} WHERE m.id = $1");
        sqlx::query_as::<_, MotherView>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mothers matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &MotherFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MotherView>, sqlx::Error> {
        let query = format!(
            "{VIEW_SELECT} WHERE {FILTER}
             ORDER BY m.created_at DESC, m.id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, MotherView>(&query)
            .bind(&filter.status)
            .bind(filter.center_id)
            .bind(filter.search.as_deref().map(contains_pattern))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &MotherFilter) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM mothers m
             JOIN qr_cards q ON q.id = m.qr_card_id
             WHERE {FILTER}"
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&filter.status)
            .bind(filter.center_id)
            .bind(filter.search.as_deref().map(contains_pattern))
            .fetch_one(pool)
            .await
    }

    /// The `limit` most recently registered mothers.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<MotherView>, sqlx::Error> {
        let query = format!("{VIEW_SELECT} ORDER BY m.created_at DESC, m.id DESC LIMIT $1");
        sqlx::query_as::<_, MotherView>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Mother counts split by card status, ignoring filters.
    pub async fn stats(pool: &PgPool) -> Result<MotherStats, sqlx::Error> {
        sqlx::query_as::<_, MotherStats>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE q.status = 'validated') AS validated,
                COUNT(*) FILTER (WHERE q.status = 'pending') AS pending
             FROM mothers m
             JOIN qr_cards q ON q.id = m.qr_card_id",
        )
        .fetch_one(pool)
        .await
    }

    /// Update a mother. Only non-`None` fields in `input` are applied.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateMother,
    ) -> Result<Option<Mother>, sqlx::Error> {
        let query = format!(
            "UPDATE mothers SET
                full_name = COALESCE($2, full_name),
                address = COALESCE($3, address),
                phone = COALESCE($4, phone),
                birth_date = COALESCE($5, birth_date),
                profession = COALESCE($6, profession),
                center_id = COALESCE($7, center_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mother>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(input.birth_date)
            .bind(&input.profession)
            .bind(input.center_id)
            .fetch_optional(executor)
            .await
    }
}
