//! The itinerary scheduler: a 3-day × 3-slot grid filled manually or by the
//! vote-driven heuristic.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{trip_dates, Attraction, Category, DaySchedule, ScheduledActivity, TimeSlot};
use tracing::info;

use crate::catalog::AttractionCatalog;
use crate::error::PlannerError;
use crate::events::{PlannerEvent, PlannerEvents};
use crate::ledger::CategoryTallies;
use crate::schedule_store::ScheduleStore;

/// The 3-day × 3-slot assignment table.
///
/// Serialized as a map of ISO date → day blob with empty days and slots
/// omitted, the same shape the original client persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleGrid {
    days: BTreeMap<NaiveDate, DaySchedule>,
}

impl ScheduleGrid {
    pub fn get(&self, date: NaiveDate, slot: TimeSlot) -> Option<&ScheduledActivity> {
        self.days.get(&date).and_then(|day| day.slot(slot))
    }

    pub fn set(&mut self, date: NaiveDate, slot: TimeSlot, activity: ScheduledActivity) {
        self.days
            .entry(date)
            .or_default()
            .set_slot(slot, Some(activity));
    }

    /// Clear one cell. Days with no remaining assignments are dropped from
    /// the blob, as the original client did.
    pub fn remove(&mut self, date: NaiveDate, slot: TimeSlot) {
        if let Some(day) = self.days.get_mut(&date) {
            day.set_slot(slot, None);
            if day.is_empty() {
                self.days.remove(&date);
            }
        }
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of filled cells.
    pub fn assigned_count(&self) -> usize {
        self.days
            .values()
            .flat_map(|day| TimeSlot::ALL.iter().map(|slot| day.slot(*slot)))
            .filter(|cell| cell.is_some())
            .count()
    }
}

/// The fixed auto-schedule policy: which (category, rank) fills each of the
/// nine (day, slot) cells. A policy constant, not derived from data.
const AUTO_SCHEDULE_TEMPLATE: [(usize, TimeSlot, Category, usize); 9] = [
    (0, TimeSlot::Morning, Category::Shopping, 0),
    (0, TimeSlot::Afternoon, Category::Shopping, 1),
    (0, TimeSlot::Evening, Category::Dining, 0),
    (1, TimeSlot::Morning, Category::Dining, 1),
    (1, TimeSlot::Afternoon, Category::Casino, 0),
    (1, TimeSlot::Evening, Category::Dining, 2),
    (2, TimeSlot::Morning, Category::Dining, 3),
    (2, TimeSlot::Afternoon, Category::Shopping, 2),
    (2, TimeSlot::Evening, Category::Dining, 4),
];

/// Rank one category's attractions by tally descending. The sort is stable,
/// so attractions with equal tallies keep their catalog order.
fn rank_by_votes<'a>(
    attractions: &'a [Attraction],
    tallies: &HashMap<String, u32>,
) -> Vec<&'a Attraction> {
    let mut ranked: Vec<&Attraction> = attractions.iter().collect();
    ranked.sort_by(|a, b| {
        let votes_a = tallies.get(&a.id).copied().unwrap_or(0);
        let votes_b = tallies.get(&b.id).copied().unwrap_or(0);
        votes_b.cmp(&votes_a)
    });
    ranked
}

/// Owns the grid and its persistence. Single writer: one client session.
pub struct Scheduler {
    grid: ScheduleGrid,
    store: Arc<dyn ScheduleStore>,
    events: PlannerEvents,
}

impl Scheduler {
    /// Create a scheduler, restoring any previously persisted grid.
    pub fn load(store: Arc<dyn ScheduleStore>, events: PlannerEvents) -> Result<Self, PlannerError> {
        let grid = store.load()?.unwrap_or_default();
        Ok(Self { grid, store, events })
    }

    pub fn grid(&self) -> &ScheduleGrid {
        &self.grid
    }

    /// Manually assign an activity to a cell, overwriting whatever was
    /// there. Persists immediately.
    pub fn assign(
        &mut self,
        date: NaiveDate,
        slot: TimeSlot,
        activity: ScheduledActivity,
    ) -> Result<(), PlannerError> {
        info!("Assigning {} to {} {}", activity.id, date, slot.label());
        self.grid.set(date, slot, activity);
        self.persist()
    }

    /// Clear one cell. Persists immediately.
    pub fn unassign(&mut self, date: NaiveDate, slot: TimeSlot) -> Result<(), PlannerError> {
        info!("Clearing {} {}", date, slot.label());
        self.grid.remove(date, slot);
        self.persist()
    }

    /// Empty the whole grid. Persists immediately.
    pub fn clear(&mut self) -> Result<(), PlannerError> {
        self.grid.clear();
        self.persist()
    }

    /// Fill the grid from vote tallies using the fixed template.
    ///
    /// Both inputs must already be in hand; a caller that cannot produce
    /// tallies or a catalog aborts before this point, so a failed read never
    /// destroys an existing schedule. Cells whose requested (category, rank)
    /// does not exist stay empty; there is no substitution across
    /// categories.
    pub fn auto_schedule(
        &mut self,
        tallies: &CategoryTallies,
        catalog: &AttractionCatalog,
    ) -> Result<(), PlannerError> {
        let ranked_dining = rank_by_votes(
            catalog.attractions(Category::Dining),
            tallies.for_category(Category::Dining),
        );
        let ranked_shopping = rank_by_votes(
            catalog.attractions(Category::Shopping),
            tallies.for_category(Category::Shopping),
        );
        let ranked_casino = rank_by_votes(
            catalog.attractions(Category::Casino),
            tallies.for_category(Category::Casino),
        );

        let dates = trip_dates();
        let mut grid = ScheduleGrid::default();
        for (day, slot, category, rank) in AUTO_SCHEDULE_TEMPLATE {
            let ranked = match category {
                Category::Dining => &ranked_dining,
                Category::Shopping => &ranked_shopping,
                Category::Casino => &ranked_casino,
            };
            if let Some(attraction) = ranked.get(rank) {
                grid.set(dates[day], slot, ScheduledActivity::from_attraction(attraction));
            }
        }

        info!(
            "Auto-scheduled {} of 9 slots from vote tallies",
            grid.assigned_count()
        );
        self.grid = grid;
        self.persist()
    }

    fn persist(&self) -> Result<(), PlannerError> {
        self.store.save(&self.grid)?;
        self.events.emit(PlannerEvent::ScheduleChanged);
        Ok(())
    }
}
