//! The seam between a review session and whatever performs the review call.

use async_trait::async_trait;

use crate::error::ReviewResult;
use crate::types::HealthStatus;

/// Something that can review code.
///
/// Implementations issue at most one outbound call per `review` invocation
/// and never retry; every failure comes back classified.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Submit `code` verbatim and return the review text.
    async fn review(&self, code: &str) -> ReviewResult<String>;

    /// Report service health. Never fails.
    async fn health(&self) -> HealthStatus;
}
