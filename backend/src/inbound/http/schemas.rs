//! OpenAPI-only schema definitions.
//!
//! The error envelope is built by the HTTP error mapping at response time;
//! this module describes its shape for the generated document.

use utoipa::ToSchema;

use crate::domain::ErrorCode;

/// Error envelope returned by every failing endpoint.
#[derive(ToSchema)]
#[schema(as = ErrorResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Message string, or a list of `ValidationIssue` objects for
    /// `VALIDATION_ERROR`.
    #[schema(value_type = Object, example = "Task with ID 7 not found")]
    detail: serde_json::Value,
    /// Stable machine-readable error code.
    #[schema(example = "NOT_FOUND")]
    code: ErrorCode,
}
