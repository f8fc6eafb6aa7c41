//! Product catalog
//!
//! Read-only menu data. Either the built-in sample menu or a JSON file of the
//! shape `{ "items": [MenuItem...], "categories": [Category...] }`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{Category, MenuItem};
use shared::{PosError, PosResult};
use std::collections::HashSet;
use std::path::Path;

/// Label of the pseudo category that shows every item
pub const ALL_CATEGORIES: &str = "Alle";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub items: Vec<MenuItem>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and negative prices
    pub fn new(items: Vec<MenuItem>, categories: Vec<Category>) -> PosResult<Self> {
        let catalog = Self { items, categories };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The default restaurant menu
    pub fn sample() -> Self {
        let item = |id, name: &str, cents, category: &str| {
            MenuItem::new(id, name, Decimal::new(cents, 2), category)
        };

        Self {
            items: vec![
                item(1, "Adana Kebap", 1250, "Hauptgerichte"),
                item(2, "Köfte", 1100, "Hauptgerichte"),
                item(3, "Lahmacun", 550, "Snacks"),
                item(4, "Salat", 400, "Beilagen"),
                item(5, "Ayran", 200, "Getränke"),
                item(6, "Cola 0.33", 250, "Getränke"),
                item(7, "Baklava", 450, "Dessert"),
                item(8, "Pizza Sucuk", 950, "Pizza"),
                item(9, "Pizza Tonno", 1050, "Pizza"),
                item(10, "Pommes", 350, "Snacks"),
            ],
            categories: ["Hauptgerichte", "Pizza", "Snacks", "Beilagen", "Getränke", "Dessert"]
                .into_iter()
                .map(Category::named)
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> PosResult<Self> {
        let catalog: Catalog =
            serde_json::from_str(json).map_err(|e| PosError::InvalidCatalog(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> PosResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PosError::InvalidCatalog(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn find(&self, id: i64) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items of one category; `None`, an empty string or "Alle" means all
    pub fn filter(&self, category: Option<&str>) -> Vec<&MenuItem> {
        match category {
            Some(c) if !c.is_empty() && c != ALL_CATEGORIES => {
                self.items.iter().filter(|item| item.category == c).collect()
            }
            _ => self.items.iter().collect(),
        }
    }

    fn validate(&self) -> PosResult<()> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id) {
                return Err(PosError::InvalidCatalog(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
            if item.price.is_sign_negative() {
                return Err(PosError::InvalidCatalog(format!(
                    "negative price for {}",
                    item.name
                )));
            }
        }
        Ok(())
    }
}
