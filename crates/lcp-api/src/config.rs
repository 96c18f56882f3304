use std::{fmt, time::Duration};

use serde::Deserialize;

/// Deployment environment, read from `ENVIRONMENT`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Process configuration, deserialized from environment variables.
///
/// Only `LINGQ_API_KEY` is required; every other variable has a default.
#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    /// Token sent to LingQ as `Authorization: Token <key>`
    pub lingq_api_key: String,
    #[serde(default = "default_lingq_api_url")]
    pub lingq_api_url: String,
    /// The single browser origin allowed by CORS
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

fn default_lingq_api_url() -> String {
    "https://www.lingq.com/api/v2".to_string()
}

fn default_allowed_origin() -> String {
    "http://localhost:8080".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_upstream_timeout_secs() -> u64 {
    10
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("lingq_api_key", &"<redacted>")
            .field("lingq_api_url", &self.lingq_api_url)
            .field("allowed_origin", &self.allowed_origin)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .finish()
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Build from explicit `(NAME, value)` pairs instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        envy::from_iter(
            vars.into_iter()
                .map(|(name, value)| (name.into().to_lowercase(), value.into())),
        )
    }

    /// Deadline for LingQ calls, both per call and per card selection.
    pub const fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
