//! In-memory store implementations and fixture data shared by the unit
//! tests. Test-only; nothing here ships.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use shared::Vote;

use crate::catalog::AttractionCatalog;
use crate::error::PlannerError;
use crate::schedule_store::ScheduleStore;
use crate::scheduler::ScheduleGrid;
use crate::store::VoteStore;

/// Vote store backed by a Vec, mirroring the backend's behavior: duplicate
/// tuples are suppressed on write, revoking an absent vote succeeds. Can be
/// seeded with raw rows (including duplicates) and switched into a failing
/// mode to simulate transport errors.
pub struct InMemoryVoteStore {
    votes: Mutex<Vec<Vote>>,
    fail: AtomicBool,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self {
            votes: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    /// Replace the stored rows outright, bypassing write-side suppression.
    pub fn seed(&self, votes: Vec<Vote>) {
        *self.votes.lock().unwrap() = votes;
    }

    /// Make every subsequent request fail with a transport error.
    pub fn fail_next_requests(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), PlannerError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(PlannerError::Transport("simulated connection failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl VoteStore for InMemoryVoteStore {
    async fn record(&self, vote: &Vote) -> Result<(), PlannerError> {
        self.check_failure()?;
        let mut votes = self.votes.lock().unwrap();
        if !votes.contains(vote) {
            votes.push(vote.clone());
        }
        Ok(())
    }

    async fn revoke(&self, vote: &Vote) -> Result<(), PlannerError> {
        self.check_failure()?;
        self.votes.lock().unwrap().retain(|v| v != vote);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Vote>, PlannerError> {
        self.check_failure()?;
        Ok(self.votes.lock().unwrap().clone())
    }
}

/// Schedule store holding the blob in memory instead of on disk.
pub struct InMemoryScheduleStore {
    blob: Mutex<Option<ScheduleGrid>>,
}

impl InMemoryScheduleStore {
    pub fn new() -> Self {
        Self {
            blob: Mutex::new(None),
        }
    }
}

impl ScheduleStore for InMemoryScheduleStore {
    fn load(&self) -> Result<Option<ScheduleGrid>, PlannerError> {
        Ok(self.blob.lock().unwrap().clone())
    }

    fn save(&self, grid: &ScheduleGrid) -> Result<(), PlannerError> {
        *self.blob.lock().unwrap() = Some(grid.clone());
        Ok(())
    }
}

/// Catalog fixture: five dining entries, two shopping, one casino. The
/// smallest shape that exercises every template cell, including the ones
/// that must stay empty.
pub fn sample_catalog_json() -> String {
    fn entry(id: &str, name: &str, category: &str) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "name": "{name}",
                "category": "{category}",
                "price": "$$",
                "rating": "4.5/5",
                "description": "A {category} stop on the trip.",
                "image_path": "images/{id}.jpg",
                "website": "https://example.com/{id}",
                "address": "123 Harbor St",
                "good_for": "Groups"
            }}"#
        )
    }

    let dining: Vec<String> = (1..=5)
        .map(|i| entry(&format!("D{i}"), &format!("Dining {i}"), "Fine Dining"))
        .collect();
    let shopping: Vec<String> = (1..=2)
        .map(|i| entry(&format!("S{i}"), &format!("Shopping {i}"), "Shopping Mall"))
        .collect();
    let casino = entry("C1", "Casino 1", "Casino");

    format!(
        r#"{{
            "dining_options": [{}],
            "shopping_locations": [{}],
            "casino_attractions": [{}]
        }}"#,
        dining.join(","),
        shopping.join(","),
        casino
    )
}

pub fn sample_catalog() -> AttractionCatalog {
    AttractionCatalog::from_json(&sample_catalog_json()).expect("sample catalog parses")
}
