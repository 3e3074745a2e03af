//! One participant-facing planning session.
//!
//! The session is the explicit context object: the selected participant,
//! the loaded catalog, the ledger, and the scheduler all live here rather
//! than in module-level state, so independent sessions (and tests) never
//! contaminate each other.

use std::sync::Arc;

use chrono::NaiveDate;
use shared::{Participant, ScheduledActivity, TimeSlot, VotingLimits};
use tokio::sync::broadcast;
use tracing::info;

use crate::catalog::AttractionCatalog;
use crate::error::PlannerError;
use crate::events::{PlannerEvent, PlannerEvents};
use crate::ledger::{VoteLedger, VoteToggle};
use crate::schedule_store::ScheduleStore;
use crate::scheduler::{ScheduleGrid, Scheduler};
use crate::store::VoteStore;

pub struct PlannerSession {
    participant: Option<Participant>,
    catalog: Option<AttractionCatalog>,
    ledger: VoteLedger,
    scheduler: Scheduler,
    events: PlannerEvents,
}

impl PlannerSession {
    /// Create a session over the given stores, restoring any persisted
    /// schedule. The vote snapshot is empty until the first
    /// [`refresh_votes`](Self::refresh_votes).
    pub fn new(
        vote_store: Arc<dyn VoteStore>,
        schedule_store: Arc<dyn ScheduleStore>,
        limits: VotingLimits,
    ) -> Result<Self, PlannerError> {
        let events = PlannerEvents::new();
        let ledger = VoteLedger::new(vote_store, limits, events.clone());
        let scheduler = Scheduler::load(schedule_store, events.clone())?;
        Ok(Self {
            participant: None,
            catalog: None,
            ledger,
            scheduler,
            events,
        })
    }

    /// Subscribe to tally/schedule change events.
    pub fn subscribe(&self) -> broadcast::Receiver<PlannerEvent> {
        self.events.subscribe()
    }

    pub fn set_catalog(&mut self, catalog: AttractionCatalog) {
        self.catalog = Some(catalog);
    }

    pub fn catalog(&self) -> Option<&AttractionCatalog> {
        self.catalog.as_ref()
    }

    /// Pick the active participant from the fixed roster.
    pub fn select_participant(&mut self, index: usize) -> Result<&Participant, PlannerError> {
        let participant = Participant::roster()
            .into_iter()
            .find(|p| p.index == index)
            .ok_or(PlannerError::UnknownParticipant(index))?;
        info!("Selected participant: {}", participant.name);
        self.participant = Some(participant);
        Ok(self.participant.as_ref().unwrap())
    }

    pub fn participant(&self) -> Option<&Participant> {
        self.participant.as_ref()
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    /// Re-fetch the shared vote list.
    pub async fn refresh_votes(&mut self) -> Result<(), PlannerError> {
        self.ledger.refresh().await
    }

    /// Toggle the active participant's vote for an attraction. The category
    /// comes from the catalog section the attraction lives in.
    pub async fn toggle_vote(&mut self, attraction_id: &str) -> Result<VoteToggle, PlannerError> {
        let participant = self
            .participant
            .clone()
            .ok_or(PlannerError::NoParticipantSelected)?;
        let category = self
            .catalog
            .as_ref()
            .ok_or(PlannerError::DataUnavailable)?
            .category_of(attraction_id)
            .ok_or_else(|| PlannerError::UnknownAttraction(attraction_id.to_string()))?;

        self.ledger
            .toggle_vote(&participant.name, attraction_id, category)
            .await
    }

    /// The current schedule grid, for rendering.
    pub fn grid(&self) -> &ScheduleGrid {
        self.scheduler.grid()
    }

    /// Manually put an attraction into a cell.
    pub fn assign_activity(
        &mut self,
        date: NaiveDate,
        slot: TimeSlot,
        attraction_id: &str,
    ) -> Result<(), PlannerError> {
        let attraction = self
            .catalog
            .as_ref()
            .ok_or(PlannerError::DataUnavailable)?
            .get(attraction_id)
            .ok_or_else(|| PlannerError::UnknownAttraction(attraction_id.to_string()))?;
        let activity = ScheduledActivity::from_attraction(attraction);
        self.scheduler.assign(date, slot, activity)
    }

    pub fn unassign_activity(&mut self, date: NaiveDate, slot: TimeSlot) -> Result<(), PlannerError> {
        self.scheduler.unassign(date, slot)
    }

    pub fn clear_schedule(&mut self) -> Result<(), PlannerError> {
        self.scheduler.clear()
    }

    /// Replace the schedule with one derived from the current vote tallies.
    /// Aborts, leaving the existing grid untouched, when the catalog or the
    /// tallies are not available yet.
    pub fn auto_schedule(&mut self) -> Result<(), PlannerError> {
        let catalog = self.catalog.as_ref().ok_or(PlannerError::DataUnavailable)?;
        let tallies = self.ledger.category_tallies()?;
        self.scheduler.auto_schedule(&tallies, catalog)
    }
}
