//! Error types for the review client.

/// Boxed cause for failures that are not transport-shaped.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Local input validation failures. These never reach the network layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Input is empty after trimming whitespace.
    #[error("Please enter some code to review")]
    EmptyCode,

    /// Input (untrimmed) exceeds the configured limit.
    #[error("Code is too long. Maximum {max} characters allowed")]
    CodeTooLong { max: usize },
}

/// Classified review errors.
///
/// Every failure of a review call ends up as exactly one of these. The
/// underlying transport error, if any, is only reachable through
/// [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// The request did not complete within the wall-clock bound (408).
    #[error("Request timed out")]
    Timeout {
        #[source]
        source: Option<BoxError>,
    },

    /// No response was received at all (503).
    #[error("Cannot connect to server")]
    Unreachable {
        #[source]
        source: Option<BoxError>,
    },

    /// The service answered and rejected the submission (400).
    #[error("{message}")]
    Rejected { message: String },

    /// The service answered with an error status or an unusable body.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Anything that is not network-shaped (500).
    #[error("{message}")]
    Unexpected {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

pub(crate) const NO_REVIEW_CONTENT: &str = "No review content received";
pub(crate) const FAILED_TO_PROCESS: &str = "Failed to process request";
pub(crate) const UNEXPECTED: &str = "An unexpected error occurred";

impl ReviewError {
    /// Semantic status code of the classified error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Timeout { .. } => 408,
            Self::Unreachable { .. } => 503,
            Self::Rejected { .. } => 400,
            Self::Server { status, .. } => *status,
            Self::Unexpected { .. } => 500,
        }
    }

    /// Message carried by the error (same as `Display`).
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub(crate) fn no_review_content() -> Self {
        Self::Server {
            status: 500,
            message: NO_REVIEW_CONTENT.to_string(),
        }
    }

    pub(crate) fn unexpected(source: Option<BoxError>) -> Self {
        Self::Unexpected {
            message: UNEXPECTED.to_string(),
            source,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Base URL is not an absolute http(s) URL.
    #[error("invalid base url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A timeout or limit was set to zero.
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

impl From<ConfigError> for ReviewError {
    fn from(err: ConfigError) -> Self {
        Self::Unexpected {
            message: format!("invalid configuration: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

/// Result type for review operations.
pub type ReviewResult<T> = Result<T, ReviewError>;
