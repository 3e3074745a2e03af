use shared::Category;
use thiserror::Error;

/// Error taxonomy for the planner core.
///
/// Validation failures are rejected locally and never reach the network.
/// Transport failures are surfaced to the caller and not retried; the last
/// successful snapshot stays in place. Unavailable data aborts the requested
/// action without touching prior state.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Please select your name before voting.")]
    NoParticipantSelected,

    #[error("You've already used all your {category} votes ({limit} maximum).")]
    CategoryCapReached { category: Category, limit: u32 },

    #[error("Unknown participant index: {0}")]
    UnknownParticipant(usize),

    #[error("Unknown attraction: {0}")]
    UnknownAttraction(String),

    #[error("Vote service request failed: {0}")]
    Transport(String),

    #[error("Voting data is not available yet. Please try again later.")]
    DataUnavailable,

    #[error("Local storage error: {0}")]
    Storage(String),
}

impl PlannerError {
    /// True for errors rejected locally before any I/O, i.e. the ones shown
    /// to the user as a blocking message rather than logged as a fault.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PlannerError::NoParticipantSelected
                | PlannerError::CategoryCapReached { .. }
                | PlannerError::UnknownParticipant(_)
                | PlannerError::UnknownAttraction(_)
        )
    }
}
