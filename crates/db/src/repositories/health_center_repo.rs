//! Repository for the `health_centers` table.

use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::health_center::{CreateHealthCenter, HealthCenter, HealthCenterWithCount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, city, address, created_at, updated_at";

/// Provides CRUD operations for health centers.
pub struct HealthCenterRepo;

impl HealthCenterRepo {
    /// Insert a new center, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateHealthCenter,
    ) -> Result<HealthCenter, sqlx::Error> {
        let query = format!(
            "INSERT INTO health_centers (name, code, city, address)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HealthCenter>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.city)
            .bind(&input.address)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HealthCenter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM health_centers WHERE id = $1");
        sqlx::query_as::<_, HealthCenter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a center by name, ignoring case and surrounding whitespace.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<HealthCenter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM health_centers
             WHERE LOWER(name) = LOWER(TRIM($1))
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, HealthCenter>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// All centers ordered by name, each with its registered mother count.
    pub async fn list_with_counts(
        pool: &PgPool,
    ) -> Result<Vec<HealthCenterWithCount>, sqlx::Error> {
        sqlx::query_as::<_, HealthCenterWithCount>(
            "SELECT c.id, c.name, c.code, c.city, c.address, c.created_at, c.updated_at,
                    COUNT(m.id) AS mothers_count
             FROM health_centers c
             LEFT JOIN mothers m ON m.center_id = c.id
             GROUP BY c.id
             ORDER BY c.name, c.id",
        )
        .fetch_all(pool)
        .await
    }
}
