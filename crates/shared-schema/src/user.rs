//! User record and its validated fields.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum allowed length for a user name, in characters.
pub const USER_NAME_MIN: usize = 1;
/// Maximum allowed length for a user name, in characters.
pub const USER_NAME_MAX: usize = 200;

/// Validation errors returned when constructing a [`UserName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// The name has fewer characters than [`USER_NAME_MIN`].
    #[error("name must contain at least {min} character(s), got {actual}")]
    NameTooShort {
        /// Inclusive lower bound.
        min: usize,
        /// Observed length in characters.
        actual: usize,
    },
    /// The name has more characters than [`USER_NAME_MAX`].
    #[error("name must contain at most {max} characters, got {actual}")]
    NameTooLong {
        /// Inclusive upper bound.
        max: usize,
        /// Observed length in characters.
        actual: usize,
    },
}

/// Opaque user identifier.
///
/// Any string is accepted; the schema places no constraint on its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an identifier string.
    ///
    /// # Examples
    /// ```
    /// use shared_schema::UserId;
    ///
    /// let id = UserId::new("u-1");
    /// assert_eq!(id.as_ref(), "u-1");
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// User name constrained to [`USER_NAME_MIN`]..=[`USER_NAME_MAX`] characters.
///
/// Length is measured in Unicode scalar values, so `"é"` counts as one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    ///
    /// # Errors
    /// Returns [`UserValidationError`] when the length is out of bounds.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, UserValidationError> {
        let actual = name.chars().count();
        if actual < USER_NAME_MIN {
            return Err(UserValidationError::NameTooShort {
                min: USER_NAME_MIN,
                actual,
            });
        }
        if actual > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: USER_NAME_MAX,
                actual,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// User record.
///
/// ## Invariants
/// - `name` holds between [`USER_NAME_MIN`] and [`USER_NAME_MAX`] characters.
///
/// Deserialisation validates the name and ignores unknown properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    name: UserName,
}

impl User {
    /// Build a [`User`] from validated components.
    #[must_use]
    pub const fn new(id: UserId, name: UserName) -> Self {
        Self { id, name }
    }

    /// Fallible constructor from raw strings.
    ///
    /// # Errors
    /// Returns [`UserValidationError`] when the name violates its bounds.
    ///
    /// # Examples
    /// ```
    /// use shared_schema::{User, UserValidationError};
    ///
    /// assert!(User::try_from_strings("u-1", "Ada").is_ok());
    /// assert_eq!(
    ///     User::try_from_strings("u-1", ""),
    ///     Err(UserValidationError::NameTooShort { min: 1, actual: 0 })
    /// );
    /// ```
    pub fn try_from_strings(
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let validated = UserName::new(name)?;
        Ok(Self::new(UserId::new(id), validated))
    }

    /// User identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// User name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Split the record into its fields.
    #[must_use]
    pub fn into_parts(self) -> (UserId, UserName) {
        (self.id, self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDto {
    id: String,
    name: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, name } = value;
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        Self::try_from_strings(value.id, value.name)
    }
}
