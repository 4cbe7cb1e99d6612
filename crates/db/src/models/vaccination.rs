//! Vaccination model and DTOs.

use esante_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vaccination {
    pub id: DbId,
    pub pregnancy_id: DbId,
    pub nom: String,
    pub description: String,
    pub date: Date,
    pub semaine: Option<i32>,
    pub numero_lot: String,
    pub lieu_id: Option<DbId>,
    pub medecin_id: Option<DbId>,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateVaccination {
    pub nom: String,
    #[serde(default)]
    pub description: String,
    pub date: Date,
    pub semaine: Option<i32>,
    #[serde(default)]
    pub numero_lot: String,
    pub lieu_id: Option<DbId>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateVaccination {
    pub nom: Option<String>,
    pub description: Option<String>,
    pub date: Option<Date>,
    pub semaine: Option<i32>,
    pub numero_lot: Option<String>,
    pub lieu_id: Option<DbId>,
    pub is_completed: Option<bool>,
}
