//! The read-only attraction catalog.
//!
//! The catalog is owned by whoever publishes the static data file; the
//! planner only loads and reads it. Entry order within each category is
//! preserved because it is the tie-break when ranking by votes.

use serde::Deserialize;
use shared::{Attraction, Category};
use std::path::Path;
use tracing::info;

use crate::error::PlannerError;

/// On-disk shape of the attractions data file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    dining_options: Vec<Attraction>,
    shopping_locations: Vec<Attraction>,
    casino_attractions: Vec<Attraction>,
}

/// Attraction records grouped by category, in catalog order.
#[derive(Debug, Clone)]
pub struct AttractionCatalog {
    dining: Vec<Attraction>,
    shopping: Vec<Attraction>,
    casino: Vec<Attraction>,
}

impl AttractionCatalog {
    /// Parse the catalog from its JSON document.
    pub fn from_json(json: &str) -> Result<Self, PlannerError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| PlannerError::Storage(e.to_string()))?;
        let catalog = Self {
            dining: file.dining_options,
            shopping: file.shopping_locations,
            casino: file.casino_attractions,
        };
        info!(
            "Loaded attraction catalog: {} dining, {} shopping, {} casino",
            catalog.dining.len(),
            catalog.shopping.len(),
            catalog.casino.len()
        );
        Ok(catalog)
    }

    /// Load the catalog from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlannerError> {
        let json = std::fs::read_to_string(path.as_ref())
            .map_err(|e| PlannerError::Storage(e.to_string()))?;
        Self::from_json(&json)
    }

    /// All attractions in one category, in catalog order.
    pub fn attractions(&self, category: Category) -> &[Attraction] {
        match category {
            Category::Dining => &self.dining,
            Category::Shopping => &self.shopping,
            Category::Casino => &self.casino,
        }
    }

    /// Look up an attraction by id across all categories.
    pub fn get(&self, id: &str) -> Option<&Attraction> {
        Category::ALL
            .iter()
            .flat_map(|category| self.attractions(*category))
            .find(|attraction| attraction.id == id)
    }

    /// Which voting category an attraction belongs to, by catalog section.
    pub fn category_of(&self, id: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| self.attractions(*category).iter().any(|a| a.id == id))
    }

    pub fn len(&self) -> usize {
        self.dining.len() + self.shopping.len() + self.casino.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog_json;

    #[test]
    fn parses_all_three_sections() {
        let catalog = AttractionCatalog::from_json(&sample_catalog_json()).unwrap();
        assert_eq!(catalog.attractions(Category::Dining).len(), 5);
        assert_eq!(catalog.attractions(Category::Shopping).len(), 2);
        assert_eq!(catalog.attractions(Category::Casino).len(), 1);
    }

    #[test]
    fn preserves_catalog_order() {
        let catalog = AttractionCatalog::from_json(&sample_catalog_json()).unwrap();
        let ids: Vec<&str> = catalog
            .attractions(Category::Dining)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["D1", "D2", "D3", "D4", "D5"]);
    }

    #[test]
    fn category_comes_from_the_section_not_the_id() {
        let catalog = AttractionCatalog::from_json(&sample_catalog_json()).unwrap();
        assert_eq!(catalog.category_of("S2"), Some(Category::Shopping));
        assert_eq!(catalog.category_of("C1"), Some(Category::Casino));
        assert_eq!(catalog.category_of("nope"), None);
    }

    #[test]
    fn lookup_by_id() {
        let catalog = AttractionCatalog::from_json(&sample_catalog_json()).unwrap();
        assert_eq!(catalog.get("D3").unwrap().name, "Dining 3");
        assert!(catalog.get("Z9").is_none());
    }

    #[test]
    fn malformed_json_is_a_storage_error() {
        let result = AttractionCatalog::from_json("{not json");
        assert!(matches!(result, Err(PlannerError::Storage(_))));
    }
}
