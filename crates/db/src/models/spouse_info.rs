//! Spouse information model and DTOs.

use esante_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `spouse_infos` table. At most one per mother.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SpouseInfo {
    pub id: DbId,
    pub mother_id: DbId,
    pub full_name: String,
    pub birth_date: Option<Date>,
    pub blood_group: String,
    pub medical_history: String,
    pub allergies: String,
    pub phone: String,
    pub profession: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateSpouseInfo {
    pub full_name: String,
    pub birth_date: Option<Date>,
    #[serde(default)]
    pub blood_group: String,
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub profession: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSpouseInfo {
    pub full_name: Option<String>,
    pub birth_date: Option<Date>,
    pub blood_group: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub phone: Option<String>,
    pub profession: Option<String>,
}
