//! Birth plan model and DTOs.

use esante_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `birth_plans` table. At most one per pregnancy.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BirthPlan {
    pub id: DbId,
    pub pregnancy_id: DbId,
    pub lieu_souhaite_id: Option<DbId>,
    pub accompagnant: String,
    pub preferences_douleur: String,
    pub positions_preferees: String,
    pub peau_a_peau: bool,
    pub allaitement: bool,
    pub notes_particulieres: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateBirthPlan {
    pub lieu_souhaite_id: Option<DbId>,
    #[serde(default)]
    pub accompagnant: String,
    #[serde(default)]
    pub preferences_douleur: String,
    #[serde(default)]
    pub positions_preferees: String,
    pub peau_a_peau: Option<bool>,
    pub allaitement: Option<bool>,
    #[serde(default)]
    pub notes_particulieres: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBirthPlan {
    pub lieu_souhaite_id: Option<DbId>,
    pub accompagnant: Option<String>,
    pub preferences_douleur: Option<String>,
    pub positions_preferees: Option<String>,
    pub peau_a_peau: Option<bool>,
    pub allaitement: Option<bool>,
    pub notes_particulieres: Option<String>,
}
