//! Runtime validator for untyped user payloads.
//!
//! [`UserSchema`] checks a JSON value against the `User` shape and collects
//! every failed constraint instead of stopping at the first one, so callers
//! can report all problems in a single response.

use serde_json::{Map, Value};

use crate::issue::{Issue, IssueCode, JsonType, SchemaError};
use crate::user::{User, UserId, UserName};

/// Property holding the user identifier.
pub const ID_FIELD: &str = "id";
/// Property holding the user name.
pub const NAME_FIELD: &str = "name";

/// Validator for the `User` object shape.
///
/// - `id`: required string.
/// - `name`: required string of 1 to 200 characters.
///
/// Unknown properties are ignored and do not appear in the parsed [`User`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UserSchema;

impl UserSchema {
    /// Validate a JSON value and build the typed [`User`].
    ///
    /// # Errors
    /// Returns [`SchemaError`] listing every violated constraint.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use shared_schema::UserSchema;
    ///
    /// let error = UserSchema::parse(&json!({})).expect_err("both fields missing");
    /// assert_eq!(error.issues().len(), 2);
    /// ```
    pub fn parse(input: &Value) -> Result<User, SchemaError> {
        let Some(object) = input.as_object() else {
            return Err(SchemaError::single(Issue::at_root(
                IssueCode::InvalidType {
                    expected: JsonType::Object,
                    received: JsonType::of(input),
                },
            )));
        };

        let mut issues = Vec::new();
        let id = string_field(object, ID_FIELD, &mut issues).map(UserId::new);
        let name = string_field(object, NAME_FIELD, &mut issues)
            .and_then(|raw| name_field(raw, &mut issues));

        match (id, name) {
            (Some(id_value), Some(name_value)) if issues.is_empty() => {
                Ok(User::new(id_value, name_value))
            }
            _ => Err(SchemaError::from_issues(issues)),
        }
    }

    /// Parse JSON text and validate it.
    ///
    /// # Errors
    /// Malformed JSON yields a single [`IssueCode::InvalidJson`] issue;
    /// otherwise behaves like [`UserSchema::parse`].
    pub fn parse_str(input: &str) -> Result<User, SchemaError> {
        Self::parse_slice(input.as_bytes())
    }

    /// Parse a JSON byte buffer and validate it.
    ///
    /// # Errors
    /// See [`UserSchema::parse_str`].
    pub fn parse_slice(input: &[u8]) -> Result<User, SchemaError> {
        let value: Value = serde_json::from_slice(input).map_err(|err| {
            SchemaError::single(Issue::at_root(IssueCode::InvalidJson {
                reason: err.to_string(),
            }))
        })?;
        Self::parse(&value)
    }

    /// Return whether the value satisfies the schema.
    #[must_use]
    pub fn is_valid(input: &Value) -> bool {
        Self::parse(input).is_ok()
    }
}

fn string_field<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    issues: &mut Vec<Issue>,
) -> Option<&'a str> {
    match object.get(field) {
        None => {
            issues.push(Issue::at_field(field, IssueCode::Required));
            None
        }
        Some(Value::String(value)) => Some(value.as_str()),
        Some(other) => {
            issues.push(Issue::at_field(
                field,
                IssueCode::InvalidType {
                    expected: JsonType::String,
                    received: JsonType::of(other),
                },
            ));
            None
        }
    }
}

fn name_field(raw: &str, issues: &mut Vec<Issue>) -> Option<UserName> {
    match UserName::new(raw) {
        Ok(name) => Some(name),
        Err(err) => {
            issues.push(Issue::at_field(NAME_FIELD, IssueCode::from(err)));
            None
        }
    }
}
