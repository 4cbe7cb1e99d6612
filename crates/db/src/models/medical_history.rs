//! Medical history (antecedents) model and DTOs.

use esante_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MedicalHistory {
    pub id: DbId,
    pub mother_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    /// Free text: patients often only remember a year or a season.
    pub date_diagnostic: String,
    pub details: String,
    /// For family history: which relative.
    pub relation: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateMedicalHistory {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub date_diagnostic: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub relation: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMedicalHistory {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub date_diagnostic: Option<String>,
    pub details: Option<String>,
    pub relation: Option<String>,
}
