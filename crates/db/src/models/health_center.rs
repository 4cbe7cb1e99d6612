//! Health center model and DTOs.

use esante_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HealthCenter {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub city: String,
    pub address: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Center row plus the number of mothers registered there.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HealthCenterWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub center: HealthCenter,
    pub mothers_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateHealthCenter {
    pub name: String,
    pub code: String,
    pub city: String,
    #[serde(default)]
    pub address: String,
}
