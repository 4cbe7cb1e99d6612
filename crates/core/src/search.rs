//! Pagination and substring-search helpers shared by list endpoints.
//!
//! This module lives in `core` (zero internal deps) so both the repository
//! layer and the HTTP layer agree on defaults and caps.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page size for paginated listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Number of rows returned by "recent" shortcuts (recent mothers, mobile messages).
pub const RECENT_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

// ---------------------------------------------------------------------------
// Page / page_size
// ---------------------------------------------------------------------------

/// A validated `?page=&page_size=` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Build a page request from raw query values. Pages start at 1 and the
    /// page size is capped at [`MAX_PAGE_SIZE`].
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: clamp_limit(page_size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        }
    }

    /// SQL `LIMIT` value.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// SQL `OFFSET` value. Saturates for absurdly large pages, which then
    /// simply come back empty.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Build the response metadata for a result set of `total` rows.
    pub fn meta(&self, total: i64) -> PageMeta {
        PageMeta {
            total,
            page: self.page,
            page_size: self.page_size,
            total_pages: total_pages(total, self.page_size),
        }
    }
}

/// Pagination block returned alongside every paginated listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// Ceiling division of `total` rows into pages of `page_size`.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if page_size <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

// ---------------------------------------------------------------------------
// Substring search
// ---------------------------------------------------------------------------

/// Normalize a `?search=` value: trims it and drops empty input.
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Build an `ILIKE` pattern matching `term` anywhere in the column.
///
/// `%`, `_` and `\` in the user input are escaped so they match literally.
pub fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- clamp_limit ---------------------------------------------------------

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 20, 100), 20);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(200), 20, 100), 100);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(-5), 20, 100), 1);
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
    }

    // -- PageRequest ---------------------------------------------------------

    #[test]
    fn page_request_defaults() {
        let req = PageRequest::new(None, None);
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn page_size_is_capped_at_one_hundred() {
        let req = PageRequest::new(Some(2), Some(500));
        assert_eq!(req.page_size, 100);
        assert_eq!(req.offset(), 100);
    }

    #[test]
    fn huge_page_saturates_offset() {
        let req = PageRequest::new(Some(i64::MAX), Some(100));
        assert_eq!(req.offset(), i64::MAX);
        assert_eq!(req.meta(3).total_pages, 1);
    }

    #[test]
    fn page_zero_is_treated_as_first_page() {
        assert_eq!(PageRequest::new(Some(0), Some(10)).page, 1);
    }

    #[test]
    fn meta_rounds_total_pages_up() {
        let meta = PageRequest::new(Some(1), Some(20)).meta(41);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(PageRequest::new(None, None).meta(0).total_pages, 0);
    }

    // -- search --------------------------------------------------------------

    #[test]
    fn blank_search_is_dropped() {
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(None), None);
        assert_eq!(normalize_search(Some(" Awa ")), Some("Awa".to_string()));
    }

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Awa"), "%Awa%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
