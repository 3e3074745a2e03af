//! Client side of the vote service.
//!
//! The remote list is the source of truth: callers mutate through
//! [`VoteStore`] and then re-read the full list, they never patch a local
//! cache and trust it. Failures are surfaced, not retried.

use async_trait::async_trait;
use shared::{Vote, VoteRequest};
use std::time::Duration;
use tracing::info;

use crate::error::PlannerError;

/// Contract of the remote vote store.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Record a vote. Duplicate tuples are suppressed server-side and still
    /// succeed.
    async fn record(&self, vote: &Vote) -> Result<(), PlannerError>;

    /// Remove a vote. Removing an absent vote succeeds.
    async fn revoke(&self, vote: &Vote) -> Result<(), PlannerError>;

    /// Every stored vote across all participants.
    async fn list_all(&self) -> Result<Vec<Vote>, PlannerError>;
}

// Bounded timeout so a dead service fails the request instead of hanging
// the session. There is still no retry and no cancellation.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the vote service (`GET /votes/raw`, `POST /vote`,
/// `DELETE /vote`).
pub struct HttpVoteStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVoteStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, PlannerError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(transport)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport(e: reqwest::Error) -> PlannerError {
    PlannerError::Transport(e.to_string())
}

#[async_trait]
impl VoteStore for HttpVoteStore {
    async fn record(&self, vote: &Vote) -> Result<(), PlannerError> {
        info!("POST /vote for {} by {}", vote.attraction_id, vote.participant);
        let body = VoteRequest::from(vote.clone());
        self.client
            .post(self.url("/vote"))
            .json(&body)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        Ok(())
    }

    async fn revoke(&self, vote: &Vote) -> Result<(), PlannerError> {
        info!("DELETE /vote for {} by {}", vote.attraction_id, vote.participant);
        let body = VoteRequest::from(vote.clone());
        self.client
            .delete(self.url("/vote"))
            .json(&body)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Vote>, PlannerError> {
        let votes = self
            .client
            .get(self.url("/votes/raw"))
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?
            .json::<Vec<Vote>>()
            .await
            .map_err(transport)?;
        Ok(votes)
    }
}
