use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Standardized error response model
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error type or category
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Response envelope for operations that return no data
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Running service version
    pub version: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Computed pagination summary for a list result.
///
/// Computed fresh per query and never persisted. The flags reflect the
/// request, not existence: page 2 of an empty set still reports
/// `has_previous_page = true`.
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    pub item_count: u64,
    pub page_count: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PageMeta {
    /// Compute metadata for a page of `item_count` total rows.
    ///
    /// `limit` must already be clamped to at least 1 by the caller.
    pub fn new(page: u64, limit: u64, item_count: u64) -> Self {
        let page_count = item_count.div_ceil(limit);
        Self {
            page,
            limit,
            item_count,
            page_count,
            has_previous_page: page > 1,
            has_next_page: page < page_count,
        }
    }
}
