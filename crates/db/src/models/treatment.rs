//! Treatment model and DTOs.

use esante_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Treatment {
    pub id: DbId,
    pub pregnancy_id: DbId,
    pub nom: String,
    pub dosage: String,
    pub frequence: String,
    pub date_debut: Date,
    pub date_fin: Option<Date>,
    pub motif: String,
    pub prescrit_par_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateTreatment {
    pub nom: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequence: String,
    pub date_debut: Date,
    pub date_fin: Option<Date>,
    #[serde(default)]
    pub motif: String,
    pub is_active: Option<bool>,
}
