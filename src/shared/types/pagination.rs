//! Pagination primitives for collection endpoints
//!
//! Every list endpoint resolves its raw query string into [`PaginationParams`]
//! and wraps its result set into a [`PaginatedResponse`]. The JSON shape of
//! the response envelope is a frontend contract — field names must not change.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Resolved pagination query parameters.
///
/// Derived per request from the raw query string, never persisted.
/// Holds the invariant `offset = (page - 1) * limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    /// 1-based page index
    pub page: u32,
    /// Page size, clamped to `[1, 100]`
    pub limit: u32,
    /// Row offset into the full result set
    pub offset: u64,
}

impl PaginationParams {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 20;
    pub const MAX_LIMIT: u32 = 100;

    /// Resolve pagination from an untrusted query-string map.
    ///
    /// Total over arbitrary input: missing or non-numeric `page`/`limit`
    /// fall back to defaults, out-of-range values are clamped. A supplied
    /// `limit` of 0 is clamped up to 1 so downstream page math never
    /// divides by zero.
    pub fn resolve(raw: &HashMap<String, String>) -> Self {
        let page = raw
            .get("page")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(Self::DEFAULT_PAGE)
            .max(1);
        let limit = raw
            .get("limit")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT);

        Self {
            page,
            limit,
            offset: u64::from(page - 1) * u64::from(limit),
        }
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Page metadata returned alongside the data slice.
///
/// `next_page`/`prev_page` serialize as explicit `null` when not applicable;
/// the frontend relies on the keys always being present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Total number of pages
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
}

impl PaginationMeta {
    /// Pure derivation from `(total, page, limit)`. `limit` must be >= 1,
    /// which [`PaginationParams::resolve`] guarantees.
    pub fn new(total: u64, page: u32, limit: u32) -> Self {
        let total_pages = ((total as f64) / (limit as f64)).ceil() as u32;
        let has_next = page < total_pages;
        let has_prev = page > 1;
        Self {
            total,
            page,
            limit,
            total_pages,
            has_next,
            has_prev,
            next_page: has_next.then(|| page + 1),
            prev_page: has_prev.then(|| page - 1),
        }
    }
}

/// Paginated response envelope
///
/// Serializes as `{"data": [...], "pagination": {...}}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// Items on the current page
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(total, page, limit),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
