//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog entry (Artikel)
///
/// Reference data: loaded with the catalog and never mutated by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    /// Price in currency unit, tax inclusive
    pub price: Decimal,
    /// Category reference (`Category::id`)
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Create an available item without description
    pub fn new(id: i64, name: impl Into<String>, price: Decimal, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
            description: None,
            available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_defaults_to_true() {
        let item: MenuItem =
            serde_json::from_str(r#"{"id":5,"name":"Ayran","price":"2.00","category":"Getränke"}"#)
                .unwrap();
        assert!(item.available);
        assert_eq!(item.price, Decimal::new(200, 2));
        assert!(item.description.is_none());
    }

    #[test]
    fn test_price_accepts_json_number() {
        let item: MenuItem = serde_json::from_str(
            r#"{"id":1,"name":"Adana Kebap","price":12.5,"category":"Hauptgerichte","available":false}"#,
        )
        .unwrap();
        assert_eq!(item.price, Decimal::new(125, 1));
        assert!(!item.available);
    }
}
