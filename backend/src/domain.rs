use crate::db::DbConnection;
use anyhow::Result;
use shared::Vote;
use tracing::info;

/// VoteService holds the backend's vote list operations.
///
/// Identity is client-asserted: the participant name in the request is
/// trusted as-is. Per-category caps are enforced on the client side only;
/// the store's job is limited to suppressing exact duplicate tuples.
#[derive(Clone)]
pub struct VoteService {
    db: DbConnection,
}

impl VoteService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Record a vote. Duplicate tuples are suppressed at the store and
    /// still count as success, so a retried POST stays idempotent.
    pub async fn record_vote(&self, vote: &Vote) -> Result<()> {
        Self::validate(vote)?;

        let inserted = self.db.insert_vote(vote).await?;
        info!(
            "Recorded vote for {} by {} (new row: {})",
            vote.attraction_id, vote.participant, inserted
        );
        Ok(())
    }

    /// Remove a vote. Removing a vote that is not present is not an error.
    pub async fn revoke_vote(&self, vote: &Vote) -> Result<()> {
        Self::validate(vote)?;

        let removed = self.db.delete_vote(vote).await?;
        info!(
            "Revoked vote for {} by {} (row removed: {})",
            vote.attraction_id, vote.participant, removed
        );
        Ok(())
    }

    /// Every stored vote, in insertion order.
    pub async fn list_raw_votes(&self) -> Result<Vec<Vote>> {
        self.db.list_votes().await
    }

    fn validate(vote: &Vote) -> Result<()> {
        if vote.participant.trim().is_empty() {
            anyhow::bail!("Participant must not be empty");
        }
        if vote.attraction_id.trim().is_empty() {
            anyhow::bail!("Attraction id must not be empty");
        }
        Ok(())
    }
}
