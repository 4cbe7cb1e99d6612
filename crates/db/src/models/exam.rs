//! Medical exam model and DTOs.

use esante_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MedicalExam {
    pub id: DbId,
    pub pregnancy_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub nom: String,
    pub date: Date,
    pub semaine: Option<i32>,
    pub resultats: String,
    pub observations: String,
    pub lieu_id: Option<DbId>,
    pub medecin_id: Option<DbId>,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateMedicalExam {
    #[serde(rename = "type")]
    pub kind: String,
    pub nom: String,
    pub date: Date,
    pub semaine: Option<i32>,
    #[serde(default)]
    pub resultats: String,
    #[serde(default)]
    pub observations: String,
    pub lieu_id: Option<DbId>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMedicalExam {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub nom: Option<String>,
    pub date: Option<Date>,
    pub semaine: Option<i32>,
    pub resultats: Option<String>,
    pub observations: Option<String>,
    pub lieu_id: Option<DbId>,
    pub is_completed: Option<bool>,
}
