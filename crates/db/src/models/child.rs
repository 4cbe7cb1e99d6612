//! Child model and DTOs.

use esante_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Child {
    pub id: DbId,
    pub pregnancy_id: DbId,
    pub full_name: String,
    /// `M` or `F`.
    pub sexe: String,
    pub birth_date: Date,
    /// Kilograms.
    pub birth_weight: Option<f64>,
    /// Centimetres.
    pub birth_height: Option<f64>,
    pub numero_dossier: String,
    pub is_alive: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateChild {
    pub full_name: String,
    pub sexe: String,
    pub birth_date: Date,
    pub birth_weight: Option<f64>,
    pub birth_height: Option<f64>,
    #[serde(default)]
    pub numero_dossier: String,
    pub is_alive: Option<bool>,
}
