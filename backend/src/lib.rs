//! API backend library: URI-versioned HTTP adapters over the shared user
//! schema, plus the middleware and configuration the server binary wires up.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod settings;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::{Trace, UriVersioning};
