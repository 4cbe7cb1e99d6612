//! Shared response envelope types for API handlers.
//!
//! Single resources and plain lists use the `{ "data": ... }` envelope.
//! Directory listings add a pagination block and head counts.

use esante_core::search::PageMeta;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "pagination": {...}, "stats": {...} }` envelope.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize, S: Serialize> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
    pub stats: S,
}

/// `{ "detail": "..." }` acknowledgement for actions without a body.
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
