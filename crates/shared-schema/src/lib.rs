//! Shared `User` record schema.
//!
//! This crate holds the contract for user records exchanged with the backend.
//! It is independent of any web framework so the same rules apply wherever a
//! user payload is accepted.
//!
//! # Overview
//!
//! - [`User`] is the static type: a validated identifier and name.
//! - [`UserSchema`] is the runtime validator: it checks an untyped JSON value
//!   and reports every failed constraint as an [`Issue`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use shared_schema::{IssueCode, UserSchema};
//!
//! let user = UserSchema::parse(&json!({"id": "u-1", "name": "Ada"})).expect("valid user");
//! assert_eq!(user.name().as_ref(), "Ada");
//!
//! let error = UserSchema::parse(&json!({"id": "u-1", "name": ""})).expect_err("empty name");
//! assert!(matches!(
//!     error.issues()[0].code(),
//!     IssueCode::TooSmall { minimum: 1, .. }
//! ));
//! ```

mod issue;
mod schema;
mod user;

pub use issue::{Issue, IssueCode, JsonType, SchemaError};
pub use schema::{ID_FIELD, NAME_FIELD, UserSchema};
pub use user::{USER_NAME_MAX, USER_NAME_MIN, User, UserId, UserName, UserValidationError};
