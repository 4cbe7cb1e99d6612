//! QR card model and DTOs.

use esante_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `qr_cards` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QrCard {
    pub id: DbId,
    pub code: String,
    pub status: String,
    /// Path of the PNG relative to the media root.
    pub image_path: String,
    pub center_name: String,
    pub center_city: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Card joined with the mother attached to it, if any.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QrCardWithMother {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub card: QrCard,
    pub mother_id: Option<DbId>,
    pub mother_name: Option<String>,
    pub mother_phone: Option<String>,
}

/// Optional legacy center labels printed on a batch of cards.
#[derive(Debug, Default, Deserialize)]
pub struct CreateQrCard {
    #[serde(default)]
    pub center_name: String,
    #[serde(default)]
    pub center_city: String,
}
