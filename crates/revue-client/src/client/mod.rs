//! Review client for the analysis service.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info};

use crate::classify::classify;
use crate::error::{ReviewError, ReviewResult};
use crate::service::ReviewService;
use crate::types::{HealthStatus, ReviewConfig};

mod http;

use http::HttpBackend;

pub(crate) const USER_AGENT_VALUE: &str = concat!("revue-client/", env!("CARGO_PKG_VERSION"));

/// Review client for the analysis service.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    http: HttpBackend,
}

impl ReviewClient {
    /// Build a client. Fails if `config` does not pass
    /// [`ReviewConfig::validate`].
    pub fn new(config: ReviewConfig) -> ReviewResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(default_headers)
            .build()
            .map_err(|e| ReviewError::Unexpected {
                message: format!("failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        let base_url = config.base_url().to_string();

        Ok(Self {
            http: HttpBackend {
                client,
                base_url,
                config,
            },
        })
    }

    pub fn from_env() -> ReviewResult<Self> {
        Self::new(ReviewConfig::from_env())
    }

    /// Submit code for review. Exactly one request is issued; no retries.
    pub async fn review(&self, code: &str) -> ReviewResult<String> {
        let review = self.http.review(code).await.map_err(classify)?;
        info!(review_len = review.len(), "review received");
        Ok(review)
    }

    /// Check whether the service reports itself healthy.
    pub async fn check_health(&self) -> bool {
        let status = self.http.health(self.http.config.health_timeout()).await;
        debug!(status = ?status, "health check complete");
        status == HealthStatus::Healthy
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.http.config
    }
}

#[async_trait]
impl ReviewService for ReviewClient {
    async fn review(&self, code: &str) -> ReviewResult<String> {
        ReviewClient::review(self, code).await
    }

    async fn health(&self) -> HealthStatus {
        self.http.health(self.http.config.health_timeout()).await
    }
}
