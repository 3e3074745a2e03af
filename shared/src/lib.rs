use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attraction category. Every vote and every catalog entry carries this
/// explicitly; nothing is inferred from the id's prefix letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dining,
    Shopping,
    Casino,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Dining, Category::Shopping, Category::Casino];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dining => "dining",
            Category::Shopping => "shopping",
            Category::Casino => "casino",
        }
    }

    /// Parse the lowercase storage form back into a category.
    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "dining" => Some(Category::Dining),
            "shopping" => Some(Category::Shopping),
            "casino" => Some(Category::Casino),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single attraction from the trip catalog.
///
/// Catalog entries are read-only: the planner consumes them, it never
/// creates or mutates them. The `category` field here is the display label
/// from the data file ("Steakhouse", "Outlet Mall", ...); the voting
/// [`Category`] comes from which catalog section the entry lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub rating: String,
    pub description: String,
    pub image_path: String,
    pub website: String,
    pub address: String,
    pub good_for: String,
}

/// One recorded vote, as returned by `GET /votes/raw`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vote {
    pub participant: String,
    pub attraction_id: String,
    pub category: Category,
}

/// Mutation body for `POST /vote` and `DELETE /vote`.
///
/// The vote service's read side uses snake_case (`attraction_id`) while the
/// mutation side uses camelCase (`attractionId`). The asymmetry is part of
/// the published contract, so both shapes are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub participant: String,
    #[serde(rename = "attractionId")]
    pub attraction_id: String,
    pub category: Category,
}

impl From<Vote> for VoteRequest {
    fn from(vote: Vote) -> Self {
        Self {
            participant: vote.participant,
            attraction_id: vote.attraction_id,
            category: vote.category,
        }
    }
}

impl From<VoteRequest> for Vote {
    fn from(request: VoteRequest) -> Self {
        Self {
            participant: request.participant,
            attraction_id: request.attraction_id,
            category: request.category,
        }
    }
}

/// Maximum votes a participant may cast within each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingLimits {
    pub dining: u32,
    pub shopping: u32,
    pub casino: u32,
}

impl VotingLimits {
    pub fn limit(&self, category: Category) -> u32 {
        match category {
            Category::Dining => self.dining,
            Category::Shopping => self.shopping,
            Category::Casino => self.casino,
        }
    }
}

impl Default for VotingLimits {
    /// The trip's standard limits: 3 dining, 2 shopping, 1 casino.
    fn default() -> Self {
        Self {
            dining: 3,
            shopping: 2,
            casino: 1,
        }
    }
}

/// Number of people on the trip. The roster is fixed; participants are not
/// created or removed at runtime.
pub const PARTICIPANT_COUNT: usize = 7;

/// A trip participant: ordinal index plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub index: usize,
    pub name: String,
}

impl Participant {
    /// The fixed, pre-enumerated roster ("Participant 1".."Participant 7").
    pub fn roster() -> Vec<Participant> {
        (0..PARTICIPANT_COUNT)
            .map(|index| Participant {
                index,
                name: format!("Participant {}", index + 1),
            })
            .collect()
    }
}

/// The three fixed trip dates: June 16-18, 2025.
pub fn trip_dates() -> [NaiveDate; 3] {
    [
        NaiveDate::from_ymd_opt(2025, 6, 16).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 17).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 18).unwrap(),
    ]
}

/// Time slot within a trip day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
        }
    }

    pub fn time_range(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "8:00 AM - 12:00 PM",
            TimeSlot::Afternoon => "12:00 PM - 5:00 PM",
            TimeSlot::Evening => "5:00 PM - 10:00 PM",
        }
    }
}

/// What a schedule cell holds once an attraction is assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledActivity {
    pub id: String,
    pub name: String,
    pub category: String,
    pub image: String,
}

impl ScheduledActivity {
    pub fn from_attraction(attraction: &Attraction) -> Self {
        Self {
            id: attraction.id.clone(),
            name: attraction.name.clone(),
            category: attraction.category.clone(),
            image: attraction.image_path.clone(),
        }
    }
}

/// One day's three slots. Empty slots are omitted from the serialized blob,
/// matching what the original client wrote to storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morning: Option<ScheduledActivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afternoon: Option<ScheduledActivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening: Option<ScheduledActivity>,
}

impl DaySchedule {
    pub fn slot(&self, slot: TimeSlot) -> Option<&ScheduledActivity> {
        match slot {
            TimeSlot::Morning => self.morning.as_ref(),
            TimeSlot::Afternoon => self.afternoon.as_ref(),
            TimeSlot::Evening => self.evening.as_ref(),
        }
    }

    pub fn set_slot(&mut self, slot: TimeSlot, activity: Option<ScheduledActivity>) {
        match slot {
            TimeSlot::Morning => self.morning = activity,
            TimeSlot::Afternoon => self.afternoon = activity,
            TimeSlot::Evening => self.evening = activity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.morning.is_none() && self.afternoon.is_none() && self.evening.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Dining).unwrap(), "\"dining\"");
        assert_eq!(
            serde_json::from_str::<Category>("\"casino\"").unwrap(),
            Category::Casino
        );
    }

    #[test]
    fn vote_request_uses_camel_case_attraction_id() {
        let request = VoteRequest {
            participant: "Participant 1".to_string(),
            attraction_id: "D1".to_string(),
            category: Category::Dining,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"attractionId\":\"D1\""));

        let parsed: VoteRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn raw_vote_uses_snake_case_attraction_id() {
        let json = r#"{"participant":"Participant 2","attraction_id":"S1","category":"shopping"}"#;
        let vote: Vote = serde_json::from_str(json).unwrap();
        assert_eq!(vote.attraction_id, "S1");
        assert_eq!(vote.category, Category::Shopping);
    }

    #[test]
    fn default_limits_match_trip_rules() {
        let limits = VotingLimits::default();
        assert_eq!(limits.limit(Category::Dining), 3);
        assert_eq!(limits.limit(Category::Shopping), 2);
        assert_eq!(limits.limit(Category::Casino), 1);
    }

    #[test]
    fn roster_is_seven_numbered_participants() {
        let roster = Participant::roster();
        assert_eq!(roster.len(), PARTICIPANT_COUNT);
        assert_eq!(roster[0].name, "Participant 1");
        assert_eq!(roster[6].name, "Participant 7");
        assert_eq!(roster[3].index, 3);
    }

    #[test]
    fn day_schedule_omits_empty_slots() {
        let mut day = DaySchedule::default();
        day.set_slot(
            TimeSlot::Evening,
            Some(ScheduledActivity {
                id: "D1".to_string(),
                name: "Steakhouse".to_string(),
                category: "Fine Dining".to_string(),
                image: "images/d1.jpg".to_string(),
            }),
        );

        let json = serde_json::to_string(&day).unwrap();
        assert!(!json.contains("morning"));
        assert!(!json.contains("afternoon"));
        assert!(json.contains("\"evening\""));
    }

    #[test]
    fn day_schedule_accepts_sparse_blob() {
        // Blob shape written by the original client: absent slots, not nulls.
        let json = r#"{"morning":{"id":"S1","name":"Harbor Mall","category":"Shopping Mall","image":"images/s1.jpg"}}"#;
        let day: DaySchedule = serde_json::from_str(json).unwrap();
        assert!(day.slot(TimeSlot::Morning).is_some());
        assert!(day.slot(TimeSlot::Afternoon).is_none());
        assert!(day.slot(TimeSlot::Evening).is_none());
        assert!(!day.is_empty());
    }

    #[test]
    fn trip_dates_are_three_consecutive_days() {
        let dates = trip_dates();
        assert_eq!(dates[0].to_string(), "2025-06-16");
        assert_eq!(dates[2].to_string(), "2025-06-18");
    }
}
