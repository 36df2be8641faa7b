//! HTTP server configuration object and helpers.

use std::net::{Ipv4Addr, SocketAddr};

use api_backend::domain::VersioningPolicy;
use mockable::Env;

/// Variable naming the listening port.
pub const PORT_ENV: &str = "PORT";
/// Port used when [`PORT_ENV`] is unset.
pub const DEFAULT_PORT: u16 = 3000;
const PORT_EXPECTED: &str = "an integer port between 0 and 65535";

/// Errors raised while reading server configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ServerConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) versioning: VersioningPolicy,
}

impl ServerConfig {
    /// Listen on all interfaces at `port` with the default versioning policy.
    #[must_use]
    pub fn new(port: u16) -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            versioning: VersioningPolicy::default(),
        }
    }

    /// Read the listening port from [`PORT_ENV`], defaulting to 3000.
    ///
    /// # Errors
    /// Returns [`ServerConfigError::InvalidEnv`] when the variable is set but
    /// is not a valid port number.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ServerConfigError> {
        let port = match env.string(PORT_ENV) {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ServerConfigError::InvalidEnv {
                    name: PORT_ENV,
                    value: raw,
                    expected: PORT_EXPECTED,
                })?,
        };
        Ok(Self::new(port))
    }

    /// Replace the versioning policy.
    #[must_use]
    pub fn with_versioning(mut self, policy: VersioningPolicy) -> Self {
        self.versioning = policy;
        self
    }

    /// Override the bind address.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Used by tests to bind loopback addresses")
    )]
    #[must_use]
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
