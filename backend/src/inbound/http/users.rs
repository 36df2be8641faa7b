//! User validation handler.
//!
//! ```text
//! POST /v4/users {"id":"3fa85f64","name":"Ada Lovelace"}
//! POST /users    (routed to the default version)
//! ```
//!
//! The body is read as raw bytes and validated with the shared user schema so
//! every issue is reported at once, rather than failing on the first field
//! as `web::Json` extraction would.

use actix_web::{post, web};
use serde_json::json;
use shared_schema::{SchemaError, User, UserSchema};
use tracing::debug;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema as UserSchemaDoc};
use crate::middleware::ResolvedVersion;

fn map_schema_error(err: &SchemaError) -> Error {
    Error::invalid_request("user payload failed validation")
        .with_details(json!({ "issues": err.issues() }))
}

/// Validate a user payload and echo the parsed user.
#[utoipa::path(
    post,
    path = "/v4/users",
    request_body = UserSchemaDoc,
    responses(
        (status = 200, description = "Payload is a valid user", body = UserSchemaDoc),
        (status = 400, description = "Payload failed validation", body = ErrorSchema),
        (status = 404, description = "API version not supported", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "validateUser"
)]
#[post("/users")]
pub async fn validate_user(
    version: ResolvedVersion,
    body: web::Bytes,
) -> ApiResult<web::Json<User>> {
    let user = UserSchema::parse_slice(&body).map_err(|err| {
        debug!(version = %version.version(), issues = err.issues().len(), "rejected user payload");
        map_schema_error(&err)
    })?;
    Ok(web::Json(user))
}
