//! Trait abstraction for the relay client to enable mocking in tests

use async_trait::async_trait;

use super::http::RelayClientError;
use crate::relay::{RelayOutcome, SubmissionPayload};

/// Trait for relay client operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelayClientTrait: Send + Sync {
    /// Post one booking request and return the relay's verdict
    async fn submit(&self, payload: &SubmissionPayload) -> Result<RelayOutcome, RelayClientError>;

    /// Where requests are posted, for display
    fn endpoint(&self) -> String;
}
