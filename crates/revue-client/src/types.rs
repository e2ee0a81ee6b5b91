//! Wire types and client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::validate::MAX_CODE_LENGTH;

/// Body of `POST /api/review`.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRequest<'a> {
    /// Exact user-entered text, never trimmed.
    pub code: &'a str,
}

/// Body returned by `POST /api/review`.
///
/// At most one field is meaningful; an empty string counts as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewResponse {
    /// Review text (markdown).
    #[serde(default)]
    pub review: Option<String>,

    /// Application-level rejection message.
    #[serde(default)]
    pub error: Option<String>,
}

impl ReviewResponse {
    /// Parse a response body leniently: anything that is not a JSON object
    /// with the expected fields yields an empty response.
    pub(crate) fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub(crate) fn error_text(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    pub(crate) fn review_text(&self) -> Option<&str> {
        self.review.as_deref().filter(|r| !r.is_empty())
    }
}

/// Reported health of the review service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    #[serde(other)]
    Unhealthy,
}

/// Body returned by `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Base URL of the review service.
    #[serde(default = "default_url")]
    pub url: String,

    /// Wall-clock bound for a review request, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Wall-clock bound for a health check, in milliseconds.
    #[serde(default = "default_health_timeout_ms")]
    pub health_timeout_ms: u64,

    /// Maximum submission length, in characters.
    #[serde(default = "default_max_code_length")]
    pub max_code_length: usize,
}

fn default_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_health_timeout_ms() -> u64 {
    5_000
}

fn default_max_code_length() -> usize {
    MAX_CODE_LENGTH
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_ms: default_timeout_ms(),
            health_timeout_ms: default_health_timeout_ms(),
            max_code_length: default_max_code_length(),
        }
    }
}

impl ReviewConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `REVUE_API_URL` | Service base URL |
    /// | `REVUE_TIMEOUT_MS` | Review request timeout |
    /// | `REVUE_HEALTH_TIMEOUT_MS` | Health check timeout |
    /// | `REVUE_MAX_CODE_LENGTH` | Maximum submission length |
    ///
    /// Unset or unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REVUE_API_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(default_url),
            timeout_ms: env_parse("REVUE_TIMEOUT_MS").unwrap_or_else(default_timeout_ms),
            health_timeout_ms: env_parse("REVUE_HEALTH_TIMEOUT_MS")
                .unwrap_or_else(default_health_timeout_ms),
            max_code_length: env_parse("REVUE_MAX_CODE_LENGTH")
                .unwrap_or_else(default_max_code_length),
        }
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the review request timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the health check timeout.
    pub fn with_health_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.health_timeout_ms = timeout_ms;
        self
    }

    /// Set the maximum submission length.
    pub fn with_max_code_length(mut self, max: usize) -> Self {
        self.max_code_length = max;
        self
    }

    /// Check the config is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.url).map_err(|e| ConfigError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: self.url.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Zero {
                field: "timeout_ms",
            });
        }
        if self.health_timeout_ms == 0 {
            return Err(ConfigError::Zero {
                field: "health_timeout_ms",
            });
        }
        if self.max_code_length == 0 {
            return Err(ConfigError::Zero {
                field: "max_code_length",
            });
        }
        Ok(())
    }

    /// Base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
