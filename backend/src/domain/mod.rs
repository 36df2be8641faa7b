//! Domain primitives.
//!
//! Purpose: Define transport-agnostic types used by the HTTP adapter. Keep
//! types immutable and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - TraceId (alias to `trace_id::TraceId`): request correlation identifier.
//! - ApiVersion / VersioningPolicy: URI version model and resolution rules.

pub mod error;
pub mod trace_id;
pub mod versioning;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::versioning::{
    ApiVersion, ApiVersionParseError, DEFAULT_API_VERSION, Resolution, VersioningPolicy,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use api_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
