//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

#[cfg(debug_assertions)]
use api_backend::doc::ApiDoc;
use api_backend::domain::VersioningPolicy;
use api_backend::inbound::http::api_scope;
use api_backend::inbound::http::health::{HealthState, live, ready};
use api_backend::{Trace, UriVersioning};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    policy: &Arc<VersioningPolicy>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let app = policy.supported().fold(
        App::new()
            .app_data(health_state)
            .wrap(UriVersioning::new(VersioningPolicy::clone(policy)))
            .wrap(Trace)
            .service(ready)
            .service(live),
        |app, version| app.service(api_scope(version)),
    );

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails, e.g. because
/// the port is already in use.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        versioning,
    } = config;
    let policy = Arc::new(versioning);
    let default_version = policy.default_version();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), &policy))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, %default_version, "HTTP server listening");
    health_state.mark_ready();
    Ok(server)
}
