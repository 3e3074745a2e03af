//! Schedule persistence.
//!
//! The grid is stored as one serialized blob under a fixed key, the way the
//! original client kept it in browser storage. It survives a reload of the
//! same profile; it is not synced anywhere.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::PlannerError;
use crate::scheduler::ScheduleGrid;

/// Fixed identifier the schedule blob lives under.
pub const SCHEDULE_KEY: &str = "trip_schedule";

pub trait ScheduleStore: Send + Sync {
    /// Load the persisted grid, or None when nothing was saved yet.
    fn load(&self) -> Result<Option<ScheduleGrid>, PlannerError>;

    /// Replace the persisted blob with the given grid, all-or-nothing.
    fn save(&self, grid: &ScheduleGrid) -> Result<(), PlannerError>;
}

/// File-backed schedule store: `<dir>/trip_schedule.json`, written
/// atomically via a temp file and rename.
pub struct JsonFileScheduleStore {
    dir: PathBuf,
}

impl JsonFileScheduleStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", SCHEDULE_KEY))
    }
}

fn storage(e: impl std::fmt::Display) -> PlannerError {
    PlannerError::Storage(e.to_string())
}

impl ScheduleStore for JsonFileScheduleStore {
    fn load(&self) -> Result<Option<ScheduleGrid>, PlannerError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(storage)?;
        let grid: ScheduleGrid = serde_json::from_str(&json).map_err(storage)?;
        info!("Loaded schedule blob from {}", path.display());
        Ok(Some(grid))
    }

    fn save(&self, grid: &ScheduleGrid) -> Result<(), PlannerError> {
        fs::create_dir_all(&self.dir).map_err(storage)?;

        let json = serde_json::to_string_pretty(grid).map_err(storage)?;
        let path = self.path();
        let tmp_path = self.dir.join(format!("{}.json.tmp", SCHEDULE_KEY));

        // Write the whole blob to a temp file first, then rename over the
        // old one, so a crash mid-write never leaves a torn schedule.
        fs::write(&tmp_path, json).map_err(storage)?;
        fs::rename(&tmp_path, &path).map_err(storage)?;
        Ok(())
    }
}
