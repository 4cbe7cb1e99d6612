//! Appointment model and DTOs.

use esante_core::types::{Date, DbId, Time, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Appointment {
    pub id: DbId,
    pub pregnancy_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub date: Date,
    pub heure: Option<Time>,
    pub lieu_id: Option<DbId>,
    pub medecin_id: Option<DbId>,
    pub status: String,
    pub notes: String,
    pub rappel_envoye: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateAppointment {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub date: Date,
    pub heure: Option<Time>,
    pub lieu_id: Option<DbId>,
    pub status: Option<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAppointment {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub date: Option<Date>,
    pub heure: Option<Time>,
    pub lieu_id: Option<DbId>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub rappel_envoye: Option<bool>,
}
