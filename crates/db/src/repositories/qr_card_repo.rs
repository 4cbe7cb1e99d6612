//! Repository for the `qr_cards` table.

use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::qr_card::{CreateQrCard, QrCard, QrCardWithMother};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, status, image_path, center_name, center_city, \
                        created_at, updated_at";

/// Card columns qualified with the `c` alias, plus the attached mother.
const JOINED_COLUMNS: &str = "c.id, c.code, c.status, c.image_path, c.center_name, \
                               c.center_city, c.created_at, c.updated_at, \
                               m.id AS mother_id, m.full_name AS mother_name, \
                               m.phone AS mother_phone";

/// Provides CRUD operations for QR cards.
pub struct QrCardRepo;

impl QrCardRepo {
    /// Insert a new pending card with a pre-generated code and image path.
    pub async fn create(
        pool: &PgPool,
        code: &str,
        image_path: &str,
        input: &CreateQrCard,
    ) -> Result<QrCard, sqlx::Error> {
        let query = format!(
            "INSERT INTO qr_cards (code, image_path, center_name, center_city)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QrCard>(&query)
            .bind(code)
            .bind(image_path)
            .bind(&input.center_name)
            .bind(&input.center_city)
            .fetch_one(pool)
            .await
    }

    /// Whether a card already uses `code`.
    pub async fn code_exists(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM qr_cards WHERE code = $1)")
            .bind(code)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<QrCard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM qr_cards WHERE id = $1");
        sqlx::query_as::<_, QrCard>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a card by its exact code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<QrCard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM qr_cards WHERE code = $1");
        sqlx::query_as::<_, QrCard>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Cards newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<QrCardWithMother>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM qr_cards c
             LEFT JOIN mothers m ON m.qr_card_id = c.id
             WHERE ($1::TEXT IS NULL OR c.status = $1)
             ORDER BY c.created_at DESC, c.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, QrCardWithMother>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, status: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM qr_cards WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(pool)
        .await
    }
}
