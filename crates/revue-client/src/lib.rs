//! Client for the revue code review service.
//!
//! This crate implements the review-request lifecycle:
//!
//! - Input validation (emptiness and size limits, never trimming what is sent)
//! - A single bounded HTTP call per submission, with no internal retries
//! - Classification of every failure into a fixed [`ReviewError`] taxonomy
//! - A [`ReviewSession`] state machine the presentation layer reads from
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use revue_client::{Phase, ReviewClient, ReviewConfig, ReviewSession};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ReviewConfig::from_env();
//! let client = ReviewClient::new(config.clone())?;
//! let mut session = ReviewSession::new(Arc::new(client), &config);
//!
//! session.submit("fn main() { println!(\"hi\"); }");
//! let state = session.settle().await;
//! if state.phase == Phase::Success {
//!     println!("{}", state.result_text);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `REVUE_API_URL` | Service base URL (default: `http://127.0.0.1:5000`) |
//! | `REVUE_TIMEOUT_MS` | Review request timeout in milliseconds (default: 30000) |
//! | `REVUE_HEALTH_TIMEOUT_MS` | Health check timeout in milliseconds (default: 5000) |
//! | `REVUE_MAX_CODE_LENGTH` | Maximum submission length in characters (default: 10000) |

pub mod classify;
pub mod client;
pub mod error;
pub mod service;
pub mod session;
pub mod types;
pub mod validate;

// Re-export main types
pub use classify::{classify, Failure};
pub use client::ReviewClient;
pub use error::{BoxError, ConfigError, ReviewError, ReviewResult, ValidationError};
pub use service::ReviewService;
pub use session::{
    display_message, Phase, ReviewSession, SessionState, SubmitOutcome, CONNECTION_MESSAGE,
    TIMEOUT_MESSAGE, UNEXPECTED_MESSAGE,
};
pub use types::{HealthResponse, HealthStatus, ReviewConfig, ReviewRequest, ReviewResponse};
pub use validate::{validate, MAX_CODE_LENGTH};

/// User-Agent sent with every request.
pub const REVIEW_USER_AGENT: &str = client::USER_AGENT_VALUE;
