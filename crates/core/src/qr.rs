//! QR card lifecycle constants and PNG rendering.

use std::io::Cursor;

use image::{ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Card status
// ---------------------------------------------------------------------------

/// A printed card not yet attached to a mother.
pub const STATUS_PENDING: &str = "pending";
/// A card attached to a mother by a health worker.
pub const STATUS_VALIDATED: &str = "validated";

pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_VALIDATED];

/// Validate that a card status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid QR card status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Card verification (mobile gateway)
// ---------------------------------------------------------------------------

/// Outcome of checking a scanned code from the mobile app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Unknown,
    Pending,
    NoMother,
    Active,
}

impl CardState {
    /// Classify a card from its stored status and whether a mother is attached.
    /// `None` means the code matched no card.
    pub fn classify(status: Option<&str>, has_mother: bool) -> Self {
        match status {
            None => CardState::Unknown,
            Some(STATUS_VALIDATED) if has_mother => CardState::Active,
            Some(STATUS_VALIDATED) => CardState::NoMother,
            Some(_) => CardState::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CardState::Unknown => "unknown",
            CardState::Pending => "pending",
            CardState::NoMother => "no_mother",
            CardState::Active => "active",
        }
    }

    /// Only active cards can be used to log in.
    pub fn is_usable(self) -> bool {
        self == CardState::Active
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Pixels per QR module.
pub const MODULE_PIXELS: u32 = 10;

/// Directory, relative to the media root, holding generated card images.
pub const IMAGE_DIR: &str = "qr_codes";

/// Media-relative path of the PNG for `code`.
pub fn image_path(code: &str) -> String {
    format!("{IMAGE_DIR}/{code}.png")
}

/// Render `data` as a black-on-white PNG.
///
/// Error correction level M, [`MODULE_PIXELS`] per module and the standard
/// four-module quiet zone.
pub fn render_png(data: &str) -> Result<Vec<u8>, CoreError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)
        .map_err(|e| CoreError::Internal(format!("QR encoding failed: {e}")))?;

    let img = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .quiet_zone(true)
        .build();

    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| CoreError::Internal(format!("PNG encoding failed: {e}")))?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G'];

    #[test]
    fn renders_a_png() {
        let png = render_png("QR-ABCD1234").expect("render should succeed");
        assert!(png.starts_with(PNG_MAGIC));
    }

    #[test]
    fn rendered_image_is_square_and_module_aligned() {
        let png = render_png("QR-ABCD1234").unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!(img.width(), img.height());
        assert_eq!(img.width() % MODULE_PIXELS, 0);
    }

    #[test]
    fn image_path_is_under_qr_dir() {
        assert_eq!(image_path("QR-X"), "qr_codes/QR-X.png");
    }

    #[test]
    fn card_state_classification() {
        assert_eq!(CardState::classify(None, false), CardState::Unknown);
        assert_eq!(
            CardState::classify(Some(STATUS_PENDING), false),
            CardState::Pending
        );
        assert_eq!(
            CardState::classify(Some(STATUS_VALIDATED), false),
            CardState::NoMother
        );
        assert_eq!(
            CardState::classify(Some(STATUS_VALIDATED), true),
            CardState::Active
        );
        assert!(CardState::Active.is_usable());
        assert!(!CardState::Pending.is_usable());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(validate_status("pending").is_ok());
        assert!(validate_status("revoked").is_err());
    }
}
