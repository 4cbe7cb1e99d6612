//! Health record (booklet cover page) model and DTOs.

use esante_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `health_records` table. At most one per mother.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HealthRecord {
    pub id: DbId,
    pub mother_id: DbId,
    pub father_name: String,
    pub father_phone: String,
    pub father_profession: String,
    pub pere_carnet_center: String,
    pub identification_code: String,
    pub birth_center_id: Option<DbId>,
    /// Free-text birth center, used when the center is not registered.
    pub birth_center_name: String,
    pub allocation_info: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a health record. The birth center has already been
/// resolved to either an id or a free-text name.
#[derive(Debug, Clone)]
pub struct CreateHealthRecord {
    pub father_name: String,
    pub father_phone: String,
    pub father_profession: String,
    pub pere_carnet_center: String,
    pub identification_code: String,
    pub birth_center_id: Option<DbId>,
    pub birth_center_name: String,
    pub allocation_info: String,
}
