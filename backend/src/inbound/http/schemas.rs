//! OpenAPI schema definitions for domain and shared types.
//!
//! Neither the domain error nor the shared user model derive `ToSchema`.
//! These wrappers mirror their serialised shape so the adapter layer owns
//! the documentation concern.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource or API version does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "user payload failed validation")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "6c3f9a52-1a7e-4c2b-9a51-2f0a3b9c1d10")]
    trace_id: Option<String>,
    /// Supplementary details, e.g. `{"issues": [...]}` for validation
    /// failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`shared_schema::User`].
#[derive(ToSchema)]
#[schema(as = shared_schema::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Opaque user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Display name of 1 to 200 characters.
    #[schema(min_length = 1, max_length = 200, example = "Ada Lovelace")]
    name: String,
}

/// OpenAPI schema for [`shared_schema::Issue`].
///
/// Constraint parameters appear only for the codes that carry them.
#[derive(ToSchema)]
#[schema(as = shared_schema::Issue)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IssueSchema {
    /// Property path, empty for the payload root.
    #[schema(example = json!(["name"]))]
    path: Vec<String>,
    /// One of `invalid_json`, `required`, `invalid_type`, `too_small`,
    /// `too_big`.
    #[schema(example = "too_small")]
    code: String,
    /// Human-readable description.
    #[schema(example = "must contain at least 1 character(s)")]
    message: String,
    /// Expected JSON type for `invalid_type`.
    expected: Option<String>,
    /// Supplied JSON type for `invalid_type`.
    received: Option<String>,
    /// Lower bound for `too_small`.
    minimum: Option<usize>,
    /// Upper bound for `too_big`.
    maximum: Option<usize>,
    /// Whether the bound itself is allowed.
    inclusive: Option<bool>,
    /// Parser diagnostic for `invalid_json`.
    reason: Option<String>,
}
