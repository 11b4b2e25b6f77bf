//! Client configuration
//!
//! Loaded from the environment, from a TOML file, or built in code.
//! API keys are required; everything else has a default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use tio_common::{TenableIoError, TioResult};

pub const DEFAULT_ENDPOINT: &str = "https://cloud.tenable.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_ACCESS_KEY: &str = "TENABLEIO_ACCESS_KEY";
pub const ENV_SECRET_KEY: &str = "TENABLEIO_SECRET_KEY";
pub const ENV_ENDPOINT: &str = "TENABLEIO_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "TENABLEIO_TIMEOUT_SECS";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Client-side request throttle; unlimited when unset.
    #[serde(default)]
    pub max_requests_per_second: Option<u32>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            access_key: String::new(),
            secret_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_requests_per_second: None,
            user_agent: None,
        }
    }
}

// Keys stay out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &redact(&self.access_key))
            .field("secret_key", &redact(&self.secret_key))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_requests_per_second", &self.max_requests_per_second)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new<A: Into<String>, S: Into<String>>(access_key: A, secret_key: S) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.max_requests_per_second = Some(requests_per_second);
        self
    }

    /// Read keys and overrides from `TENABLEIO_*` environment variables.
    pub fn from_env() -> TioResult<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file; environment variables override file values.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> TioResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let mut config: ClientConfig = toml::from_str(&raw).map_err(|e| {
            TenableIoError::Config(format!("invalid config file {}: {}", path.display(), e))
        })?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> TioResult<()> {
        if let Ok(v) = std::env::var(ENV_ACCESS_KEY) {
            self.access_key = v;
        }
        if let Ok(v) = std::env::var(ENV_SECRET_KEY) {
            self.secret_key = v;
        }
        if let Ok(v) = std::env::var(ENV_ENDPOINT) {
            self.endpoint = v;
        }
        if let Ok(v) = std::env::var(ENV_TIMEOUT_SECS) {
            self.timeout_secs = v
                .trim()
                .parse()
                .map_err(|_| TenableIoError::Config(format!("{ENV_TIMEOUT_SECS}={v} is not a number")))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> TioResult<()> {
        if self.access_key.trim().is_empty() || self.secret_key.trim().is_empty() {
            return Err(TenableIoError::Config(format!(
                "API keys missing (set {ENV_ACCESS_KEY} and {ENV_SECRET_KEY})"
            )));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(TenableIoError::Config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.timeout_secs == 0 {
            return Err(TenableIoError::Config("timeout_secs must be positive".into()));
        }
        if self.max_requests_per_second == Some(0) {
            return Err(TenableIoError::Config(
                "max_requests_per_second must be positive".into(),
            ));
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Value of the `X-ApiKeys` header.
    #[must_use]
    pub fn api_keys_header(&self) -> String {
        format!("accessKey={}; secretKey={};", self.access_key, self.secret_key)
    }

    #[must_use]
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("tio/{}", tio_common::VERSION))
    }
}
