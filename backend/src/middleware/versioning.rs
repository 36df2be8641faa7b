//! URI versioning middleware.
//!
//! Resolves the API version from the first path segment before routing.
//! Unversioned requests are rewritten onto the default version so they reach
//! the same handlers as explicitly versioned ones. Requests naming a version
//! the server does not serve are answered with a `not_found` error envelope.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::http::uri::{InvalidUri, InvalidUriParts, PathAndQuery, Uri};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde_json::json;
use thiserror::Error as ThisError;
use tracing::{debug, error};

use crate::domain::{ApiVersion, Error, Resolution, VersioningPolicy};

/// Response header naming the version that served the request.
pub const API_VERSION_HEADER: &str = "api-version";

/// Middleware applying a [`VersioningPolicy`] to every request.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use api_backend::UriVersioning;
/// use api_backend::domain::{ApiVersion, VersioningPolicy};
///
/// let policy = VersioningPolicy::default().with_supported(ApiVersion::new(5));
/// let app = App::new().wrap(UriVersioning::new(policy));
/// ```
#[derive(Clone, Debug, Default)]
pub struct UriVersioning {
    policy: Arc<VersioningPolicy>,
}

impl UriVersioning {
    /// Build the middleware from a policy.
    pub fn new(policy: VersioningPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for UriVersioning
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = UriVersioningMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(UriVersioningMiddleware {
            service,
            policy: Arc::clone(&self.policy),
        }))
    }
}

/// Service wrapper produced by [`UriVersioning`].
pub struct UriVersioningMiddleware<S> {
    service: S,
    policy: Arc<VersioningPolicy>,
}

#[derive(Debug, ThisError)]
enum VersionRewriteError {
    #[error("rewritten path is not a valid URI path: {0}")]
    Path(#[from] InvalidUri),
    #[error("rewritten URI could not be assembled: {0}")]
    Parts(#[from] InvalidUriParts),
}

fn rewrite_path(req: &mut ServiceRequest, path: &str) -> Result<(), VersionRewriteError> {
    let path_and_query = match req.uri().query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_owned(),
    };
    let mut parts = req.uri().clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>()?);
    let uri = Uri::from_parts(parts)?;
    req.match_info_mut().get_mut().update(&uri);
    req.head_mut().uri = uri;
    Ok(())
}

fn unsupported_version(version: ApiVersion, policy: &VersioningPolicy) -> Error {
    let supported: Vec<String> = policy.supported().map(|v| v.to_string()).collect();
    Error::not_found(format!("API version {version} is not supported")).with_details(json!({
        "version": version.to_string(),
        "supported": supported,
    }))
}

impl<S> UriVersioningMiddleware<S> {
    fn reject<B>(
        req: ServiceRequest,
        err: Error,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, actix_web::Error>>
    where
        B: 'static,
    {
        let res = req.error_response(err).map_into_right_body();
        Box::pin(async move { Ok(res) })
    }
}

impl<S, B> Service<ServiceRequest> for UriVersioningMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let version = match self.policy.resolve(req.path()) {
            Resolution::Neutral => {
                let fut = self.service.call(req);
                return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
            }
            Resolution::Versioned(version) => version,
            Resolution::Defaulted { version, path } => {
                debug!(from = %req.path(), to = %path, "routing unversioned request to default API version");
                if let Err(err) = rewrite_path(&mut req, &path) {
                    error!(error = %err, path = %path, "failed to rewrite request path");
                    return Self::reject(req, Error::internal(err.to_string()));
                }
                version
            }
            Resolution::Unsupported(version) => {
                debug!(%version, path = %req.path(), "rejecting unsupported API version");
                let err = unsupported_version(version, &self.policy);
                return Self::reject(req, err);
            }
        };

        req.extensions_mut().insert(version);
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            if let Ok(value) = HeaderValue::from_str(&version.to_string()) {
                res.headers_mut()
                    .insert(HeaderName::from_static(API_VERSION_HEADER), value);
            }
            Ok(res.map_into_left_body())
        })
    }
}

/// Extractor yielding the API version resolved for the current request.
///
/// Fails with an internal error when [`UriVersioning`] is not installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedVersion(pub ApiVersion);

impl ResolvedVersion {
    /// The resolved version.
    pub fn version(self) -> ApiVersion {
        self.0
    }
}

impl FromRequest for ResolvedVersion {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<ApiVersion>()
                .copied()
                .map(Self)
                .ok_or_else(|| Error::internal("API version was not resolved for request")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_API_VERSION, ErrorCode};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    async fn echo_version(version: ResolvedVersion, req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().body(format!("{} {}", version.version(), req.query_string()))
    }

    async fn call(
        policy: VersioningPolicy,
        uri: &str,
    ) -> ServiceResponse<impl actix_web::body::MessageBody + use<>> {
        let app = actix_test::init_service(
            App::new()
                .wrap(UriVersioning::new(policy))
                .route("/v4/echo", web::get().to(echo_version))
                .route("/v5/echo", web::get().to(echo_version))
                .route(
                    "/health/live",
                    web::get().to(|| async { HttpResponse::Ok().finish() }),
                ),
        )
        .await;
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await
    }

    fn version_header<B>(res: &ServiceResponse<B>) -> Option<&str> {
        res.headers()
            .get(API_VERSION_HEADER)
            .and_then(|value| value.to_str().ok())
    }

    #[rstest]
    #[case("/echo", "v4 ")]
    #[case("/v4/echo", "v4 ")]
    #[case("/echo?limit=2", "v4 limit=2")]
    #[actix_web::test]
    async fn default_version_serves_versioned_and_unversioned_paths(
        #[case] uri: &str,
        #[case] expected: &str,
    ) {
        let res = call(VersioningPolicy::default(), uri).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(version_header(&res), Some("v4"));
        let body = actix_test::read_body(res).await;
        assert_eq!(body.as_ref(), expected.as_bytes());
    }

    #[actix_web::test]
    async fn additional_versions_route_to_their_handlers() {
        let policy = VersioningPolicy::default().with_supported(ApiVersion::new(5));
        let res = call(policy, "/v5/echo").await;
        assert_eq!(version_header(&res), Some("v5"));
        let body = actix_test::read_body(res).await;
        assert_eq!(body.as_ref(), b"v5 ");
    }

    #[actix_web::test]
    async fn unsupported_version_returns_not_found_envelope() {
        let res = call(VersioningPolicy::default(), "/v5/echo").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(version_header(&res).is_none());
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["details"]["version"], "v5");
        assert_eq!(body["details"]["supported"], serde_json::json!(["v4"]));
    }

    #[actix_web::test]
    async fn neutral_paths_skip_versioning() {
        let res = call(VersioningPolicy::default(), "/health/live").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(version_header(&res).is_none());
    }

    #[actix_web::test]
    async fn extractor_fails_without_middleware() {
        let app = actix_test::init_service(App::new().route("/v4/echo", web::get().to(echo_version))).await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/v4/echo").to_request()).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Error = actix_test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::InternalError);
    }

    #[rstest]
    fn unsupported_error_lists_served_versions() {
        let policy = VersioningPolicy::default().with_supported(ApiVersion::new(6));
        let err = unsupported_version(ApiVersion::new(9), &policy);
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(
            err.details(),
            Some(&serde_json::json!({"version": "v9", "supported": ["v4", "v6"]}))
        );
        assert_eq!(DEFAULT_API_VERSION, ApiVersion::new(4));
    }
}
