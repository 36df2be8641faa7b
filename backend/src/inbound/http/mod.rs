//! HTTP inbound adapter exposing REST endpoints.

use actix_web::{Scope, web};

use crate::domain::ApiVersion;

pub mod error;
pub mod health;
pub mod schemas;
pub mod users;

pub use error::ApiResult;

/// Versioned API routes mounted under `/{version}`.
///
/// The server mounts one scope per served version; the URI versioning
/// middleware rewrites unversioned paths onto the default one.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use api_backend::domain::DEFAULT_API_VERSION;
/// use api_backend::inbound::http::api_scope;
///
/// let app = App::new().service(api_scope(DEFAULT_API_VERSION));
/// ```
pub fn api_scope(version: ApiVersion) -> Scope {
    web::scope(&format!("/{version}")).service(users::validate_user)
}
