//! Mother model and DTOs.

use esante_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `mothers` table. One-to-one with a QR card.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Mother {
    pub id: DbId,
    pub qr_card_id: DbId,
    pub full_name: String,
    pub address: String,
    pub phone: String,
    pub birth_date: Date,
    pub profession: String,
    pub center_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Mother joined with her card, center name and record flag.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MotherView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub mother: Mother,
    pub qr_code: String,
    pub qr_status: String,
    pub center_name: Option<String>,
    pub has_record: bool,
}

/// Identity fields captured when a card is validated.
#[derive(Debug, Clone)]
pub struct UpsertMother {
    pub full_name: String,
    pub address: String,
    pub phone: String,
    pub birth_date: Date,
    pub profession: String,
    pub center_id: Option<DbId>,
}

/// Partial update of a mother's identity fields.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdateMother {
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<Date>,
    pub profession: Option<String>,
    pub center_id: Option<DbId>,
}

impl UpdateMother {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.birth_date.is_none()
            && self.profession.is_none()
            && self.center_id.is_none()
    }
}

/// Filters for the mother directory.
#[derive(Debug, Default)]
pub struct MotherFilter {
    /// Card status (`pending` / `validated`).
    pub status: Option<String>,
    pub center_id: Option<DbId>,
    /// Case-insensitive substring of the full name or QR code.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MotherStats {
    pub total: i64,
    pub validated: i64,
    pub pending: i64,
}
