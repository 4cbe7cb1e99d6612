//! Repository for the `pregnancy_evolutions` table.

use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::evolution::{CreateEvolution, Evolution};

const COLUMNS: &str = "id, pregnancy_id, date, semaine, poids_maman, tension, poids_estime_bebe, \
                        taille_femorale, diametre_biparietal, observations, medecin_id, \
                        created_at, updated_at";

/// Provides CRUD operations for pregnancy evolution entries.
pub struct EvolutionRepo;

impl EvolutionRepo {
    pub async fn create(
        pool: &PgPool,
        pregnancy_id: DbId,
        medecin_id: Option<DbId>,
        input: &CreateEvolution,
    ) -> Result<Evolution, sqlx::Error> {
        let query = format!(
            "INSERT INTO pregnancy_evolutions
                (pregnancy_id, date, semaine, poids_maman, tension, poids_estime_bebe,
                 taille_femorale, diametre_biparietal, observations, medecin_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Evolution>(&query)
            .bind(pregnancy_id)
            .bind(input.date)
            .bind(input.semaine)
            .bind(input.poids_maman)
            .bind(&input.tension)
            .bind(input.poids_estime_bebe)
            .bind(input.taille_femorale)
            .bind(input.diametre_biparietal)
            .bind(&input.observations)
            .bind(medecin_id)
            .fetch_one(pool)
            .await
    }

    /// Evolution entries in gestational order.
    pub async fn list_for_pregnancy(
        pool: &PgPool,
        pregnancy_id: DbId,
    ) -> Result<Vec<Evolution>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pregnancy_evolutions
             WHERE pregnancy_id = $1
             ORDER BY semaine, date, id"
        );
        sqlx::query_as::<_, Evolution>(&query)
            .bind(pregnancy_id)
            .fetch_all(pool)
            .await
    }
}
