//! HTTP layer: request issuing and status/body interpretation.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use std::time::Duration;

use tracing::debug;

use crate::classify::Failure;
use crate::error::ReviewError;
use crate::types::{HealthResponse, HealthStatus, ReviewConfig, ReviewRequest, ReviewResponse};

pub(crate) const REVIEW_PATH: &str = "/api/review";
pub(crate) const HEALTH_PATH: &str = "/api/health";

/// HTTP backend for making requests (holds reqwest client and config).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) config: ReviewConfig,
}

impl HttpBackend {
    /// Issue exactly one review request, bounded by the configured timeout.
    pub(crate) async fn review(&self, code: &str) -> Result<String, Failure> {
        match tokio::time::timeout(self.config.timeout(), self.review_once(code)).await {
            Ok(result) => result,
            Err(_) => Err(Failure::TimedOut),
        }
    }

    async fn review_once(&self, code: &str) -> Result<String, Failure> {
        let url = format!("{}{}", self.base_url, REVIEW_PATH);
        debug!(url = %url, code_len = code.chars().count(), "sending review request");

        let response = self
            .client
            .post(&url)
            .json(&ReviewRequest { code })
            .send()
            .await?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() || status.is_success() => return Err(Failure::Transport(e)),
            Err(e) => {
                debug!(error = %e, "failed to read review response body");
                String::new()
            }
        };

        if !status.is_success() {
            return Err(Failure::Status {
                status: status.as_u16(),
                body,
            });
        }

        interpret(&ReviewResponse::from_body(&body)).map_err(Failure::Classified)
    }

    /// Probe service health. Never fails: any problem reads as unhealthy.
    pub(crate) async fn health(&self, timeout: Duration) -> HealthStatus {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        debug!(url = %url, "checking service health");

        let response = match self.client.get(&url).timeout(timeout).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!(status = response.status().as_u16(), "health check returned error status");
                return HealthStatus::Unhealthy;
            }
            Err(e) => {
                debug!(error = %e, "health check failed");
                return HealthStatus::Unhealthy;
            }
        };

        match response.json::<HealthResponse>().await {
            Ok(body) => body.status,
            Err(e) => {
                debug!(error = %e, "failed to parse health response");
                HealthStatus::Unhealthy
            }
        }
    }
}

/// Interpret a successful response body: `error` wins over `review`, and a
/// body with neither is unusable.
pub(crate) fn interpret(response: &ReviewResponse) -> Result<String, ReviewError> {
    if let Some(error) = response.error_text() {
        return Err(ReviewError::Rejected {
            message: error.to_string(),
        });
    }

    match response.review_text() {
        Some(review) => Ok(review.to_string()),
        None => Err(ReviewError::no_review_content()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(review: Option<&str>, error: Option<&str>) -> ReviewResponse {
        ReviewResponse {
            review: review.map(String::from),
            error: error.map(String::from),
        }
    }

    #[test]
    fn test_interpret_review_verbatim() {
        let text = "## Findings\n\n- none  \n";
        assert_eq!(interpret(&response(Some(text), None)).unwrap(), text);
    }

    #[test]
    fn test_interpret_error_wins() {
        let err = interpret(&response(Some("ok"), Some("bad syntax"))).unwrap_err();
        assert!(matches!(err, ReviewError::Rejected { ref message } if message == "bad syntax"));
    }

    #[test]
    fn test_interpret_neither_field() {
        let err = interpret(&response(None, None)).unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "No review content received");

        let blank = interpret(&response(Some(""), Some(""))).unwrap_err();
        assert_eq!(blank.message(), "No review content received");
    }
}
