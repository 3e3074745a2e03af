//! # Trip Planner Core
//!
//! Client-side core for the group trip planner: the vote ledger (per-
//! participant views, tallies, category caps), the itinerary scheduler
//! (manual edits and the vote-driven auto-fill), and the stores they sit
//! on. Rendering is someone else's job: a presentation layer subscribes to
//! [`events::PlannerEvent`] and reads back through the accessors on
//! [`session::PlannerSession`].
//!
//! The remote vote list is the source of truth for votes: every mutation is
//! followed by a full re-read, and per-category caps are checked locally
//! before any request goes out. The schedule grid is local to one session
//! and persisted as a single blob.

pub mod catalog;
pub mod error;
pub mod events;
pub mod ledger;
pub mod schedule_store;
pub mod scheduler;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::AttractionCatalog;
pub use error::PlannerError;
pub use events::{PlannerEvent, PlannerEvents};
pub use ledger::{CategoryTallies, VoteLedger, VoteToggle};
pub use schedule_store::{JsonFileScheduleStore, ScheduleStore, SCHEDULE_KEY};
pub use scheduler::{ScheduleGrid, Scheduler};
pub use session::PlannerSession;
pub use store::{HttpVoteStore, VoteStore};
