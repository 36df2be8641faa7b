//! Request middleware.
//!
//! Purpose: request lifecycle concerns applied before routing, namely trace
//! correlation and URI version resolution.

pub mod trace;
pub mod versioning;

pub use trace::Trace;
pub use versioning::{API_VERSION_HEADER, ResolvedVersion, UriVersioning};
