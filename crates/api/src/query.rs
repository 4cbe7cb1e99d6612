//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?qr_code=` parameter accepted by mobile read endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct QrCodeParam {
    pub qr_code: Option<String>,
}
