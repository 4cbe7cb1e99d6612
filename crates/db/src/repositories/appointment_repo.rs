//! Repository for the `appointments` table.

use esante_core::booklet::appointment_status;
use esante_core::types::DbId;
use sqlx::PgPool;

use crate::models::appointment::{Appointment, CreateAppointment, UpdateAppointment};

const COLUMNS: &str = "id, pregnancy_id, type, title, date, heure, lieu_id, medecin_id, status, \
                        notes, rappel_envoye, created_at, updated_at";

/// Provides CRUD operations for appointments.
pub struct AppointmentRepo;

impl AppointmentRepo {
    pub async fn create(
        pool: &PgPool,
        pregnancy_id: DbId,
        medecin_id: Option<DbId>,
        input: &CreateAppointment,
    ) -> Result<Appointment, sqlx::Error> {
        let query = format!(
            "INSERT INTO appointments
                (pregnancy_id, type, title, date, heure, lieu_id, medecin_id, status, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(pregnancy_id)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(input.date)
            .bind(input.heure)
            .bind(input.lieu_id)
            .bind(medecin_id)
            .bind(input.status.as_deref().unwrap_or(appointment_status::PLANIFIE))
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Appointments of a pregnancy in calendar order, optionally of one status.
    pub async fn list_for_pregnancy(
        pool: &PgPool,
        pregnancy_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointments
             WHERE pregnancy_id = $1 AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY date, heure NULLS LAST, id"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(pregnancy_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        pregnancy_id: DbId,
        id: DbId,
        input: &UpdateAppointment,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET
                type = COALESCE($3, type),
                title = COALESCE($4, title),
                date = COALESCE($5, date),
                heure = COALESCE($6, heure),
                lieu_id = COALESCE($7, lieu_id),
                status = COALESCE($8, status),
                notes = COALESCE($9, notes),
                rappel_envoye = COALESCE($10, rappel_envoye)
             WHERE id = $1 AND pregnancy_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(pregnancy_id)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(input.date)
            .bind(input.heure)
            .bind(input.lieu_id)
            .bind(&input.status)
            .bind(&input.notes)
            .bind(input.rappel_envoye)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, pregnancy_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1 AND pregnancy_id = $2")
            .bind(id)
            .bind(pregnancy_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
