//! Structured validation failures reported by [`crate::UserSchema`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::user::UserValidationError;

/// JSON value kinds named in type-mismatch issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonType {
    /// A JSON object.
    Object,
    /// A JSON array.
    Array,
    /// A JSON string.
    String,
    /// A JSON number.
    Number,
    /// A JSON boolean.
    Boolean,
    /// JSON `null`.
    Null,
}

impl JsonType {
    /// Classify a JSON value.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use shared_schema::JsonType;
    ///
    /// assert_eq!(JsonType::of(&json!(42)), JsonType::Number);
    /// assert_eq!(JsonType::of(&json!(null)), JsonType::Null);
    /// ```
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
            Value::Null => Self::Null,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The constraint that failed, with its parameters.
///
/// Serialised with a `code` tag, e.g.
/// `{"code": "too_big", "maximum": 200, "inclusive": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IssueCode {
    /// The input text is not valid JSON.
    InvalidJson {
        /// Parser diagnostic.
        reason: String,
    },
    /// A required property is absent.
    Required,
    /// A value has the wrong JSON type.
    InvalidType {
        /// Type the schema expects.
        expected: JsonType,
        /// Type that was supplied.
        received: JsonType,
    },
    /// A string is shorter than allowed.
    TooSmall {
        /// Lower length bound.
        minimum: usize,
        /// Whether `minimum` itself is allowed.
        inclusive: bool,
    },
    /// A string is longer than allowed.
    TooBig {
        /// Upper length bound.
        maximum: usize,
        /// Whether `maximum` itself is allowed.
        inclusive: bool,
    },
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson { reason } => write!(f, "invalid JSON: {reason}"),
            Self::Required => f.write_str("required property is missing"),
            Self::InvalidType { expected, received } => {
                write!(f, "expected {expected}, received {received}")
            }
            Self::TooSmall { minimum, .. } => {
                write!(f, "must contain at least {minimum} character(s)")
            }
            Self::TooBig { maximum, .. } => {
                write!(f, "must contain at most {maximum} character(s)")
            }
        }
    }
}

impl From<UserValidationError> for IssueCode {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::NameTooShort { min, .. } => Self::TooSmall {
                minimum: min,
                inclusive: true,
            },
            UserValidationError::NameTooLong { max, .. } => Self::TooBig {
                maximum: max,
                inclusive: true,
            },
        }
    }
}

/// One failed constraint, located by its property path.
///
/// An empty path refers to the input value itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    path: Vec<String>,
    #[serde(flatten)]
    code: IssueCode,
    message: String,
}

impl Issue {
    pub(crate) fn new(path: Vec<String>, code: IssueCode) -> Self {
        let message = code.to_string();
        Self {
            path,
            code,
            message,
        }
    }

    pub(crate) fn at_field(field: &str, code: IssueCode) -> Self {
        Self::new(vec![field.to_owned()], code)
    }

    pub(crate) fn at_root(code: IssueCode) -> Self {
        Self::new(Vec::new(), code)
    }

    /// Property path to the offending value.
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The failed constraint.
    #[must_use]
    pub const fn code(&self) -> &IssueCode {
        &self.code
    }

    /// Human-readable description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

/// Validation failure carrying every issue found in the input.
///
/// ## Invariants
/// - `issues` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaError {
    issues: Vec<Issue>,
}

impl SchemaError {
    pub(crate) fn from_issues(issues: Vec<Issue>) -> Self {
        debug_assert!(!issues.is_empty(), "schema errors carry at least one issue");
        Self { issues }
    }

    pub(crate) fn single(issue: Issue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    /// Issues in the order they were detected.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consume the error, returning its issues.
    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// First issue reported for a top-level property, if any.
    #[must_use]
    pub fn issue_for(&self, field: &str) -> Option<&Issue> {
        self.issues
            .iter()
            .find(|issue| issue.path.first().is_some_and(|head| head == field))
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut issues = self.issues.iter();
        if let Some(first) = issues.next() {
            write!(f, "{first}")?;
        }
        for issue in issues {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaError {}
