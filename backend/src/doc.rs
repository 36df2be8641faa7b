//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the versioned user endpoint, the version-neutral
//! health probes, and schema wrappers for the error envelope and shared user
//! model. Swagger UI serves it in debug builds and `openapi-dump` prints it.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, IssueSchema, UserSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "API backend",
        description = "URI-versioned HTTP interface. Unversioned paths are served by the default version (v4)."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::validate_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserSchema, IssueSchema, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "User payload validation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const USER_SCHEMA_NAME: &str = "shared_schema.User";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        for field in ["code", "message", "traceId", "details"] {
            assert_object_schema_has_field(error_schema, field);
        }
    }

    #[test]
    fn user_schema_has_id_and_name() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user_schema = schemas.get(USER_SCHEMA_NAME).expect("User schema");

        assert_object_schema_has_field(user_schema, "id");
        assert_object_schema_has_field(user_schema, "name");
    }

    #[test]
    fn paths_cover_users_and_probes() {
        let doc = ApiDoc::openapi();
        for path in ["/v4/users", "/health/ready", "/health/live"] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }
}
