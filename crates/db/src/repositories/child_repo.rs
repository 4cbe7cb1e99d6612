//! Repository for the `children` table.

use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::child::{Child, CreateChild};

const COLUMNS: &str = "id, pregnancy_id, full_name, sexe, birth_date, birth_weight, \
                        birth_height, numero_dossier, is_alive, created_at, updated_at";

/// Provides CRUD operations for children.
pub struct ChildRepo;

impl ChildRepo {
    pub async fn create(
        pool: &PgPool,
        pregnancy_id: DbId,
        input: &CreateChild,
    ) -> Result<Child, sqlx::Error> {
        let query = format!(
            "INSERT INTO children
                (pregnancy_id, full_name, sexe, birth_date, birth_weight, birth_height,
                 numero_dossier, is_alive)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Child>(&query)
            .bind(pregnancy_id)
            .bind(&input.full_name)
            .bind(&input.sexe)
            .bind(input.birth_date)
            .bind(input.birth_weight)
            .bind(input.birth_height)
            .bind(&input.numero_dossier)
            .bind(input.is_alive)
            .fetch_one(pool)
            .await
    }

    /// Children born of one pregnancy, oldest first.
    pub async fn list_for_pregnancy(
        pool: &PgPool,
        pregnancy_id: DbId,
    ) -> Result<Vec<Child>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM children WHERE pregnancy_id = $1 ORDER BY birth_date, id"
        );
        sqlx::query_as::<_, Child>(&query)
            .bind(pregnancy_id)
            .fetch_all(pool)
            .await
    }

    /// Every child of a mother across all her pregnancies.
    pub async fn list_for_mother(pool: &PgPool, mother_id: DbId) -> Result<Vec<Child>, sqlx::Error> {
        sqlx::query_as::<_, Child>(
            "SELECT c.id, c.pregnancy_id, c.full_name, c.sexe, c.birth_date, c.birth_weight,
                    c.birth_height, c.numero_dossier, c.is_alive, c.created_at, c.updated_at
             FROM children c
             JOIN pregnancies p ON p.id = c.pregnancy_id
             WHERE p.mother_id = $1
             ORDER BY c.birth_date, c.id",
        )
        .bind(mother_id)
        .fetch_all(pool)
        .await
    }
}
