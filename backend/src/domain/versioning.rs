//! URI-based API versioning model.
//!
//! The version tag is the first path segment (`/v4/users`). Requests without
//! a version segment are treated as targeting the default version, except for
//! version-neutral paths such as health probes.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Version assumed when a request path carries no version segment.
pub const DEFAULT_API_VERSION: ApiVersion = ApiVersion::new(4);

/// Path prefixes served regardless of version.
const DEFAULT_NEUTRAL_PREFIXES: [&str; 3] = ["/health", "/docs", "/api-docs"];

/// An API version tag of the form `v<number>`, e.g. `v4`.
///
/// # Examples
/// ```
/// use api_backend::domain::ApiVersion;
///
/// let version: ApiVersion = "v4".parse().expect("valid tag");
/// assert_eq!(version, ApiVersion::new(4));
/// assert_eq!(version.to_string(), "v4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion(u32);

impl ApiVersion {
    /// Build a version from its number.
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// Version number without the `v` prefix.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Raised when text is not a canonical `v<number>` tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid API version '{value}'; expected v<number> such as v4")]
pub struct ApiVersionParseError {
    value: String,
}

impl ApiVersionParseError {
    /// The rejected input.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

impl FromStr for ApiVersion {
    type Err = ApiVersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ApiVersionParseError {
            value: s.to_owned(),
        };
        let digits = s.strip_prefix('v').ok_or_else(invalid)?;
        let canonical = !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && (digits == "0" || !digits.starts_with('0'));
        if !canonical {
            return Err(invalid());
        }
        digits.parse().map(Self).map_err(|_| invalid())
    }
}

/// Outcome of resolving a request path against a [`VersioningPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path is version-neutral and routes unchanged.
    Neutral,
    /// The path already names a supported version.
    Versioned(ApiVersion),
    /// The path had no version segment; route it as `path` instead.
    Defaulted {
        /// Default version applied.
        version: ApiVersion,
        /// Rewritten path including the version segment.
        path: String,
    },
    /// The path names a well-formed version that is not served.
    Unsupported(ApiVersion),
}

/// Rules for mapping request paths onto API versions.
///
/// ## Invariants
/// - The default version is always supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersioningPolicy {
    default: ApiVersion,
    supported: BTreeSet<ApiVersion>,
    neutral_prefixes: Vec<String>,
}

impl Default for VersioningPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_API_VERSION)
    }
}

impl VersioningPolicy {
    /// Policy serving only `default`, with health and docs paths neutral.
    pub fn new(default: ApiVersion) -> Self {
        Self {
            default,
            supported: BTreeSet::from([default]),
            neutral_prefixes: DEFAULT_NEUTRAL_PREFIXES
                .iter()
                .map(|prefix| (*prefix).to_owned())
                .collect(),
        }
    }

    /// Serve an additional version.
    #[must_use]
    pub fn with_supported(mut self, version: ApiVersion) -> Self {
        self.supported.insert(version);
        self
    }

    /// Treat paths under `prefix` as version-neutral.
    #[must_use]
    pub fn with_neutral_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.neutral_prefixes.push(prefix.into());
        self
    }

    /// Version applied to unversioned requests.
    pub fn default_version(&self) -> ApiVersion {
        self.default
    }

    /// Served versions in ascending order.
    pub fn supported(&self) -> impl Iterator<Item = ApiVersion> + '_ {
        self.supported.iter().copied()
    }

    /// Whether `version` is served.
    pub fn is_supported(&self, version: ApiVersion) -> bool {
        self.supported.contains(&version)
    }

    /// Resolve a request path.
    ///
    /// # Examples
    /// ```
    /// use api_backend::domain::{ApiVersion, Resolution, VersioningPolicy};
    ///
    /// let policy = VersioningPolicy::default();
    /// assert_eq!(
    ///     policy.resolve("/users"),
    ///     Resolution::Defaulted { version: ApiVersion::new(4), path: "/v4/users".into() }
    /// );
    /// assert_eq!(policy.resolve("/v4/users"), Resolution::Versioned(ApiVersion::new(4)));
    /// assert_eq!(policy.resolve("/health/ready"), Resolution::Neutral);
    /// ```
    pub fn resolve(&self, path: &str) -> Resolution {
        if self.is_neutral(path) {
            return Resolution::Neutral;
        }

        let first_segment = path
            .strip_prefix('/')
            .unwrap_or(path)
            .split('/')
            .next()
            .unwrap_or_default();

        match first_segment.parse::<ApiVersion>() {
            Ok(version) if self.is_supported(version) => Resolution::Versioned(version),
            Ok(version) => Resolution::Unsupported(version),
            Err(_) => Resolution::Defaulted {
                version: self.default,
                path: prefixed_path(self.default, path),
            },
        }
    }

    fn is_neutral(&self, path: &str) -> bool {
        self.neutral_prefixes.iter().any(|prefix| {
            path.strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }
}

fn prefixed_path(version: ApiVersion, path: &str) -> String {
    if path.starts_with('/') {
        format!("/{version}{path}")
    } else {
        format!("/{version}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn policy() -> VersioningPolicy {
        VersioningPolicy::default()
    }

    #[rstest]
    #[case("v4", 4)]
    #[case("v0", 0)]
    #[case("v12", 12)]
    fn parses_canonical_tags(#[case] raw: &str, #[case] number: u32) {
        let version: ApiVersion = raw.parse().expect("valid tag");
        assert_eq!(version.number(), number);
        assert_eq!(version.to_string(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("v")]
    #[case("4")]
    #[case("V4")]
    #[case("v04")]
    #[case("v4a")]
    #[case("v-1")]
    #[case("users")]
    #[case("v99999999999")]
    fn rejects_non_canonical_tags(#[case] raw: &str) {
        let err = raw.parse::<ApiVersion>().expect_err("invalid tag");
        assert_eq!(err.value(), raw);
    }

    #[rstest]
    #[case("/users", "/v4/users")]
    #[case("/", "/v4/")]
    #[case("/version/users", "/v4/version/users")]
    #[case("/healthz", "/v4/healthz")]
    fn unversioned_paths_default_to_v4(
        policy: VersioningPolicy,
        #[case] path: &str,
        #[case] rewritten: &str,
    ) {
        assert_eq!(
            policy.resolve(path),
            Resolution::Defaulted {
                version: DEFAULT_API_VERSION,
                path: rewritten.to_owned(),
            }
        );
    }

    #[rstest]
    #[case("/v4")]
    #[case("/v4/users")]
    #[case("/v4/users/")]
    fn versioned_paths_resolve_to_their_version(policy: VersioningPolicy, #[case] path: &str) {
        assert_eq!(policy.resolve(path), Resolution::Versioned(ApiVersion::new(4)));
    }

    #[rstest]
    #[case("/health")]
    #[case("/health/ready")]
    #[case("/docs/")]
    #[case("/api-docs/openapi.json")]
    fn neutral_paths_pass_through(policy: VersioningPolicy, #[case] path: &str) {
        assert_eq!(policy.resolve(path), Resolution::Neutral);
    }

    #[rstest]
    fn unknown_versions_are_unsupported(policy: VersioningPolicy) {
        assert_eq!(
            policy.resolve("/v9/users"),
            Resolution::Unsupported(ApiVersion::new(9))
        );
    }

    #[rstest]
    fn additional_versions_are_served(policy: VersioningPolicy) {
        let policy = policy.with_supported(ApiVersion::new(5));
        assert_eq!(
            policy.resolve("/v5/users"),
            Resolution::Versioned(ApiVersion::new(5))
        );
        assert_eq!(
            policy.supported().collect::<Vec<_>>(),
            [ApiVersion::new(4), ApiVersion::new(5)]
        );
    }

    #[rstest]
    fn custom_neutral_prefixes_apply(policy: VersioningPolicy) {
        let policy = policy.with_neutral_prefix("/metrics");
        assert_eq!(policy.resolve("/metrics"), Resolution::Neutral);
    }

    #[test]
    fn custom_default_is_supported() {
        let policy = VersioningPolicy::new(ApiVersion::new(2));
        assert!(policy.is_supported(ApiVersion::new(2)));
        assert!(!policy.is_supported(DEFAULT_API_VERSION));
    }
}
