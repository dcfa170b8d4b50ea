use serde::Serialize;

use crate::error::AppError;

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: u64 = 20;
/// Largest page size a client may request.
pub const MAX_LIMIT: u64 = 100;
/// Largest offset the database can bind.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Success envelope shared by every JSON endpoint.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ApiResponse<T> {
    /// Always `true`.
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
    /// Endpoint-specific request echo (resolved dates, applied filters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }

    pub fn with_meta(data: T, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

/// Offset pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPagination {
    /// Number of items matching the filters, before pagination.
    #[schema(example = 47)]
    pub total: u64,
    #[schema(example = 20)]
    pub limit: u64,
    #[schema(example = 0)]
    pub offset: u64,
    /// `offset + limit < total`.
    #[schema(example = true)]
    pub has_more: bool,
}

impl OffsetPagination {
    pub fn new(total: u64, limit: u64, offset: u64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

/// Resolve `limit`/`offset` query values, clamping the limit to `1..=MAX_LIMIT` and
/// the offset to `MAX_OFFSET`.
pub fn page_bounds(limit: Option<u64>, offset: Option<u64>) -> (u64, u64) {
    (
        limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        offset.unwrap_or(0).min(MAX_OFFSET),
    )
}

/// Sort direction, `desc` unless the client asks for `asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("desc") => Ok(Self::Desc),
            Some("asc") => Ok(Self::Asc),
            Some(_) => Err(AppError::Validation(
                "sortOrder must be one of: asc, desc".into(),
            )),
        }
    }
}
