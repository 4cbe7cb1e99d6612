//! Prenatal consultation (CPN) model and DTOs.

use esante_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Consultation {
    pub id: DbId,
    pub pregnancy_id: DbId,
    /// Sequential per pregnancy.
    pub cpn_number: i32,
    pub date: Date,
    pub semaine: Option<i32>,
    pub poids: Option<f64>,
    pub tension_systolique: Option<i32>,
    pub tension_diastolique: Option<i32>,
    pub taille_uterine: Option<f64>,
    pub position_bebe: String,
    pub battements_coeur: Option<i32>,
    pub observations: String,
    pub prescriptions: String,
    pub medecin_id: Option<DbId>,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateConsultation {
    /// Assigned as count + 1 when absent.
    pub cpn_number: Option<i32>,
    pub date: Date,
    pub semaine: Option<i32>,
    pub poids: Option<f64>,
    pub tension_systolique: Option<i32>,
    pub tension_diastolique: Option<i32>,
    pub taille_uterine: Option<f64>,
    #[serde(default)]
    pub position_bebe: String,
    pub battements_coeur: Option<i32>,
    #[serde(default)]
    pub observations: String,
    #[serde(default)]
    pub prescriptions: String,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateConsultation {
    pub date: Option<Date>,
    pub semaine: Option<i32>,
    pub poids: Option<f64>,
    pub tension_systolique: Option<i32>,
    pub tension_diastolique: Option<i32>,
    pub taille_uterine: Option<f64>,
    pub position_bebe: Option<String>,
    pub battements_coeur: Option<i32>,
    pub observations: Option<String>,
    pub prescriptions: Option<String>,
    pub is_completed: Option<bool>,
}
