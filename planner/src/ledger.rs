//! The vote ledger: per-participant views, tallies, and cap enforcement.
//!
//! The ledger keeps the last successfully fetched vote list (the snapshot)
//! and re-fetches it after every mutation. The cap check runs against the
//! snapshot before any network call; it is advisory only, so two clients can
//! race past it, which is the accepted consistency model for this tool.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use shared::{Category, Vote, VotingLimits};
use tracing::info;

use crate::error::PlannerError;
use crate::events::{PlannerEvent, PlannerEvents};
use crate::store::VoteStore;

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteToggle {
    Recorded,
    Revoked,
}

/// Per-category tallies, keyed by attraction id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTallies {
    dining: HashMap<String, u32>,
    shopping: HashMap<String, u32>,
    casino: HashMap<String, u32>,
}

impl CategoryTallies {
    pub fn for_category(&self, category: Category) -> &HashMap<String, u32> {
        match category {
            Category::Dining => &self.dining,
            Category::Shopping => &self.shopping,
            Category::Casino => &self.casino,
        }
    }

    fn for_category_mut(&mut self, category: Category) -> &mut HashMap<String, u32> {
        match category {
            Category::Dining => &mut self.dining,
            Category::Shopping => &mut self.shopping,
            Category::Casino => &mut self.casino,
        }
    }

    /// Vote count for one attraction within its category.
    pub fn votes(&self, category: Category, attraction_id: &str) -> u32 {
        self.for_category(category)
            .get(attraction_id)
            .copied()
            .unwrap_or(0)
    }
}

pub struct VoteLedger {
    store: Arc<dyn VoteStore>,
    limits: VotingLimits,
    events: PlannerEvents,
    /// Last successfully fetched vote list. None until the first read
    /// succeeds; tally views derive from this, never from optimistic local
    /// mutation.
    snapshot: Option<Vec<Vote>>,
}

impl VoteLedger {
    pub fn new(store: Arc<dyn VoteStore>, limits: VotingLimits, events: PlannerEvents) -> Self {
        Self {
            store,
            limits,
            events,
            snapshot: None,
        }
    }

    pub fn limits(&self) -> &VotingLimits {
        &self.limits
    }

    /// Re-fetch the full vote list from the store. On failure the previous
    /// snapshot is left in place.
    pub async fn refresh(&mut self) -> Result<(), PlannerError> {
        let votes = self.store.list_all().await?;
        info!("Refreshed vote snapshot: {} votes", votes.len());
        self.snapshot = Some(votes);
        self.events.emit(PlannerEvent::TallyChanged);
        Ok(())
    }

    fn raw_votes(&self) -> &[Vote] {
        self.snapshot.as_deref().unwrap_or(&[])
    }

    /// One participant's votes, deduplicated by (attraction, category).
    /// Duplicate rows that slipped into the store (e.g. from a write race)
    /// collapse to one here.
    pub fn votes_for(&self, participant: &str) -> Vec<Vote> {
        let mut seen = HashSet::new();
        self.raw_votes()
            .iter()
            .filter(|vote| vote.participant == participant)
            .filter(|vote| seen.insert((vote.attraction_id.clone(), vote.category)))
            .cloned()
            .collect()
    }

    pub fn has_voted(&self, participant: &str, attraction_id: &str, category: Category) -> bool {
        self.raw_votes().iter().any(|vote| {
            vote.participant == participant
                && vote.attraction_id == attraction_id
                && vote.category == category
        })
    }

    /// Votes a participant has used within one category, from the
    /// deduplicated view.
    pub fn category_votes_used(&self, participant: &str, category: Category) -> u32 {
        self.votes_for(participant)
            .iter()
            .filter(|vote| vote.category == category)
            .count() as u32
    }

    /// Total votes per attraction across all participants. Counts every
    /// stored row: duplicates that got past write suppression count
    /// separately here, matching the original aggregation.
    pub fn tally_by_attraction(&self) -> HashMap<String, u32> {
        let mut tally = HashMap::new();
        for vote in self.raw_votes() {
            *tally.entry(vote.attraction_id.clone()).or_insert(0) += 1;
        }
        tally
    }

    /// Per-attraction tallies restricted to one category, using the
    /// explicit category field on each vote.
    pub fn tally_by_category(&self, category: Category) -> HashMap<String, u32> {
        let mut tally = HashMap::new();
        for vote in self.raw_votes().iter().filter(|v| v.category == category) {
            *tally.entry(vote.attraction_id.clone()).or_insert(0) += 1;
        }
        tally
    }

    /// Tallies for all three categories at once, as the scheduler consumes
    /// them. Errors until the first successful read so a caller never
    /// schedules from a snapshot that was never fetched.
    pub fn category_tallies(&self) -> Result<CategoryTallies, PlannerError> {
        let votes = self.snapshot.as_ref().ok_or(PlannerError::DataUnavailable)?;
        let mut tallies = CategoryTallies::default();
        for vote in votes {
            *tallies
                .for_category_mut(vote.category)
                .entry(vote.attraction_id.clone())
                .or_insert(0) += 1;
        }
        Ok(tallies)
    }

    /// Toggle a participant's vote.
    ///
    /// Voting for an already-voted attraction revokes it; voting for a new
    /// one is allowed only within the category cap. Either way the snapshot
    /// is re-fetched after the mutation, so the next read reflects the
    /// write. The cap check happens locally, before any network call.
    pub async fn toggle_vote(
        &mut self,
        participant: &str,
        attraction_id: &str,
        category: Category,
    ) -> Result<VoteToggle, PlannerError> {
        if self.snapshot.is_none() {
            return Err(PlannerError::DataUnavailable);
        }

        let vote = Vote {
            participant: participant.to_string(),
            attraction_id: attraction_id.to_string(),
            category,
        };

        if self.has_voted(participant, attraction_id, category) {
            self.store.revoke(&vote).await?;
            self.refresh().await?;
            info!("Removed vote for {} by {}", attraction_id, participant);
            Ok(VoteToggle::Revoked)
        } else {
            let used = self.category_votes_used(participant, category);
            let limit = self.limits.limit(category);
            if used >= limit {
                return Err(PlannerError::CategoryCapReached { category, limit });
            }

            self.store.record(&vote).await?;
            self.refresh().await?;
            info!("Added vote for {} by {}", attraction_id, participant);
            Ok(VoteToggle::Recorded)
        }
    }
}
