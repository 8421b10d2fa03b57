//! Configuration for Klingo client instances.
//!
//! Every request to the platform must identify a tenant (`X-DOMAIN`), a
//! portal and an operating unit; the configuration carries those alongside
//! the endpoint and an explicit request timeout.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Default platform endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.klingo.app/api";

/// Configuration for a Klingo client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct KlingoConfig {
    /// Platform base URL
    #[validate(url)]
    pub base_url: String,

    /// Tenant identifier, sent as `X-DOMAIN`
    #[validate(length(min = 1))]
    pub domain: String,

    /// Portal identifier, sent as `X-PORTAL`
    #[serde(default)]
    pub portal: u32,

    /// Operating unit identifier, sent as `X-UNIDADE`
    #[serde(default = "default_unit")]
    pub unit: u32,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,
}

const fn default_unit() -> u32 {
    1
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_tls_verify() -> bool {
    true
}

impl KlingoConfig {
    /// Create a configuration for the given tenant against the public
    /// platform endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails (e.g. an empty domain).
    pub fn new(domain: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            domain: domain.into(),
            portal: 0,
            unit: default_unit(),
            request_timeout_secs: default_request_timeout_secs(),
            tls_verify: default_tls_verify(),
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Override the base URL (self-hosted or staging installations).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL fails validation.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, Error> {
        self.base_url = base_url.into();
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid base URL: {e}")))?;
        Ok(self)
    }

    /// Set the portal identifier.
    #[must_use]
    pub const fn with_portal(mut self, portal: u32) -> Self {
        self.portal = portal;
        self
    }

    /// Set the operating unit identifier.
    #[must_use]
    pub const fn with_unit(mut self, unit: u32) -> Self {
        self.unit = unit;
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse the base URL, normalized so path joins append to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        let mut raw = self.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|e| Error::ConfigError(format!("Invalid base URL: {e}")))
    }
}
