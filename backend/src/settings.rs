//! Versioning configuration loaded via OrthoConfig.
//!
//! ```text
//! API_VERSIONING_DEFAULT_VERSION=v4
//! API_VERSIONING_SUPPORTED=v4,v5
//! ```

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{ApiVersion, ApiVersionParseError, DEFAULT_API_VERSION, VersioningPolicy};

const DEFAULT_VERSION_TAG: &str = "v4";

/// Configuration controlling which API versions the server routes.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "API_VERSIONING")]
pub struct VersioningSettings {
    /// Version applied to unversioned request paths.
    #[ortho_config(default = String::from(DEFAULT_VERSION_TAG))]
    pub default_version: String,
    /// Additional versions to serve alongside the default.
    #[serde(default)]
    #[ortho_config(default = Vec::new())]
    pub supported: Vec<String>,
}

impl VersioningSettings {
    /// Build the routing policy. A blank default falls back to `v4`.
    ///
    /// # Errors
    /// Returns [`ApiVersionParseError`] for any malformed version tag.
    ///
    /// # Examples
    /// ```
    /// use api_backend::domain::ApiVersion;
    /// use api_backend::settings::VersioningSettings;
    ///
    /// let settings = VersioningSettings {
    ///     default_version: "v4".into(),
    ///     supported: vec!["v5".into()],
    /// };
    /// let policy = settings.into_policy().expect("valid tags");
    /// assert_eq!(policy.default_version(), ApiVersion::new(4));
    /// assert!(policy.is_supported(ApiVersion::new(5)));
    /// ```
    pub fn into_policy(self) -> Result<VersioningPolicy, ApiVersionParseError> {
        let default = match self.default_version.trim() {
            "" => DEFAULT_API_VERSION,
            raw => raw.parse()?,
        };

        let extra = self
            .supported
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::parse::<ApiVersion>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(extra
            .into_iter()
            .fold(VersioningPolicy::new(default), VersioningPolicy::with_supported))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for versioning configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> VersioningSettings {
        VersioningSettings::load_from_iter([OsString::from("api-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_serve_only_v4() {
        let _guard = lock_env([
            ("API_VERSIONING_DEFAULT_VERSION", None::<String>),
            ("API_VERSIONING_SUPPORTED", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.default_version, DEFAULT_VERSION_TAG);
        assert!(settings.supported.is_empty());
        let policy = settings.into_policy().expect("valid policy");
        assert_eq!(policy.default_version(), DEFAULT_API_VERSION);
        assert_eq!(policy.supported().collect::<Vec<_>>(), [DEFAULT_API_VERSION]);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("API_VERSIONING_DEFAULT_VERSION", Some("v5".to_owned())),
            ("API_VERSIONING_SUPPORTED", Some("v4,v6".to_owned())),
        ]);

        let policy = load_from_empty_args().into_policy().expect("valid policy");
        assert_eq!(policy.default_version(), ApiVersion::new(5));
        assert_eq!(
            policy.supported().collect::<Vec<_>>(),
            [ApiVersion::new(4), ApiVersion::new(5), ApiVersion::new(6)]
        );
    }

    #[rstest]
    fn supported_list_without_default_override_keeps_v4() {
        let _guard = lock_env([
            ("API_VERSIONING_DEFAULT_VERSION", None::<String>),
            ("API_VERSIONING_SUPPORTED", Some("v4,v5".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.default_version, "v4");
        assert_eq!(settings.supported, ["v4", "v5"]);
        let policy = settings.into_policy().expect("valid policy");
        assert_eq!(
            policy.supported().collect::<Vec<_>>(),
            [ApiVersion::new(4), ApiVersion::new(5)]
        );
    }

    #[rstest]
    fn blank_default_falls_back_to_v4() {
        let settings = VersioningSettings {
            default_version: "  ".to_owned(),
            supported: Vec::new(),
        };
        let policy = settings.into_policy().expect("valid policy");
        assert_eq!(policy.default_version(), DEFAULT_API_VERSION);
    }

    #[rstest]
    #[case("4", &[])]
    #[case("v4", &["v4", "five"])]
    fn malformed_tags_are_rejected(#[case] default: &str, #[case] supported: &[&str]) {
        let settings = VersioningSettings {
            default_version: default.to_owned(),
            supported: supported.iter().map(|tag| (*tag).to_owned()).collect(),
        };
        assert!(settings.into_policy().is_err());
    }
}
