//! Pregnancy evolution (follow-up measurements) model and DTOs.

use esante_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Evolution {
    pub id: DbId,
    pub pregnancy_id: DbId,
    pub date: Date,
    pub semaine: i32,
    pub poids_maman: Option<f64>,
    pub tension: String,
    pub poids_estime_bebe: Option<f64>,
    pub taille_femorale: Option<f64>,
    pub diametre_biparietal: Option<f64>,
    pub observations: String,
    pub medecin_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateEvolution {
    pub date: Date,
    pub semaine: i32,
    pub poids_maman: Option<f64>,
    #[serde(default)]
    pub tension: String,
    pub poids_estime_bebe: Option<f64>,
    pub taille_femorale: Option<f64>,
    pub diametre_biparietal: Option<f64>,
    #[serde(default)]
    pub observations: String,
}
