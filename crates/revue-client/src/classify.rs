//! Failure classification.
//!
//! Every way a review call can go wrong is funneled through [`classify`].
//! The match arms are ordered: a timeout is never reported as a generic
//! server error, and a structured error message on the response is never
//! replaced by the generic fallback.

use tracing::warn;

use crate::error::{BoxError, ReviewError, FAILED_TO_PROCESS};
use crate::types::ReviewResponse;

/// A raw failure observed while performing a review call.
#[derive(Debug)]
pub enum Failure {
    /// Already classified by a nested step.
    Classified(ReviewError),

    /// The wall-clock bound around the whole call elapsed.
    TimedOut,

    /// Error raised by the HTTP client.
    Transport(reqwest::Error),

    /// A response arrived with a non-success status.
    Status { status: u16, body: String },
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<ReviewError> for Failure {
    fn from(err: ReviewError) -> Self {
        Self::Classified(err)
    }
}

/// Map a failure to exactly one [`ReviewError`].
pub fn classify(failure: Failure) -> ReviewError {
    let classified = match failure {
        Failure::Classified(err) => err,

        Failure::TimedOut => ReviewError::Timeout { source: None },

        Failure::Transport(err) if err.is_timeout() => ReviewError::Timeout {
            source: Some(boxed(err)),
        },

        Failure::Transport(err) if no_response(&err) => ReviewError::Unreachable {
            source: Some(boxed(err)),
        },

        Failure::Status { status, body } => {
            let response = ReviewResponse::from_body(&body);
            let message = response
                .error_text()
                .map(String::from)
                .unwrap_or_else(|| FAILED_TO_PROCESS.to_string());
            ReviewError::Server { status, message }
        }

        Failure::Transport(err) => ReviewError::unexpected(Some(boxed(err))),
    };

    warn!(
        status = classified.status_code(),
        error = %classified,
        "review request failed"
    );
    classified
}

/// True when the request never produced a response.
fn no_response(err: &reqwest::Error) -> bool {
    err.status().is_none() && (err.is_connect() || err.is_request())
}

fn boxed(err: reqwest::Error) -> BoxError {
    Box::new(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classified_passes_through() {
        let err = classify(Failure::Classified(ReviewError::Rejected {
            message: "bad syntax".into(),
        }));
        assert!(matches!(err, ReviewError::Rejected { ref message } if message == "bad syntax"));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_timed_out_is_408() {
        let err = classify(Failure::TimedOut);
        assert!(matches!(err, ReviewError::Timeout { .. }));
        assert_eq!(err.status_code(), 408);
    }

    #[test]
    fn test_status_with_structured_error_keeps_status_and_message() {
        let err = classify(Failure::Status {
            status: 422,
            body: r#"{"error":"Code cannot be empty"}"#.into(),
        });
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.message(), "Code cannot be empty");
    }

    #[test]
    fn test_status_without_structured_error_is_generic() {
        let err = classify(Failure::Status {
            status: 502,
            body: "<html>Bad Gateway</html>".into(),
        });
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.message(), "Failed to process request");

        let empty_error = classify(Failure::Status {
            status: 500,
            body: r#"{"error":""}"#.into(),
        });
        assert_eq!(empty_error.message(), "Failed to process request");
    }

    #[tokio::test]
    async fn test_builder_error_is_unexpected() {
        let err = reqwest::Client::new()
            .get("not a url")
            .send()
            .await
            .expect_err("invalid url must fail");
        assert!(err.is_builder());

        let classified = classify(Failure::from(err));
        assert!(matches!(classified, ReviewError::Unexpected { .. }));
        assert_eq!(classified.status_code(), 500);
        assert_eq!(classified.message(), "An unexpected error occurred");
        assert!(std::error::Error::source(&classified).is_some());
    }
}
