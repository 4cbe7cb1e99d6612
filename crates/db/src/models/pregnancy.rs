//! Pregnancy model and DTOs.

use esante_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pregnancies` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Pregnancy {
    pub id: DbId,
    pub mother_id: DbId,
    /// 1 for the first pregnancy, 2 for the second, and so on.
    pub numero: i32,
    pub status: String,
    pub date_derniere_regles: Option<Date>,
    pub date_accouchement_prevue: Option<Date>,
    pub date_accouchement_reel: Option<Date>,
    pub mode_accouchement: String,
    pub lieu_accouchement_id: Option<DbId>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Pregnancy with its child count, for list views.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PregnancyWithCounts {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub pregnancy: Pregnancy,
    pub children_count: i64,
    pub consultations_count: i64,
    pub vaccinations_count: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatePregnancy {
    pub status: Option<String>,
    pub date_derniere_regles: Option<Date>,
    pub date_accouchement_prevue: Option<Date>,
    pub date_accouchement_reel: Option<Date>,
    #[serde(default)]
    pub mode_accouchement: String,
    pub lieu_accouchement_id: Option<DbId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePregnancy {
    pub status: Option<String>,
    pub date_derniere_regles: Option<Date>,
    pub date_accouchement_prevue: Option<Date>,
    pub date_accouchement_reel: Option<Date>,
    pub mode_accouchement: Option<String>,
    pub lieu_accouchement_id: Option<DbId>,
}
