//! Business listings

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::constants::CATEGORIES;
use crate::core::Result;
use super::{require_non_empty, Entity, SortValue};

/// Fixed set of business categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Shops and markets
    Shopping,
    /// Places to eat
    Restaurant,
    /// Bars and clubs
    Nightlife,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Category; 3] = [Category::Shopping, Category::Restaurant, Category::Nightlife];

    /// Wire name of the category
    pub fn as_str(&self) -> &'static str {
        CATEGORIES[*self as usize]
    }
}

/// A business listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    /// Display name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Listing category
    pub category: Category,

    /// Visitor comments, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,

    /// Fields not modelled above, kept as loaded
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Business {
    /// Create a business with no comments
    pub fn new(name: impl Into<String>, description: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category,
            comments: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl Entity for Business {
    const KIND: &'static str = "Business";
    const SORT_KEYS: &'static [&'static str] = &["category", "name"];
    const DEFAULT_SORT_KEY: &'static str = "category";

    fn searchable_text(&self) -> (&str, &str) {
        (&self.name, &self.description)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        match key {
            "category" => Some(SortValue::Text(self.category.as_str())),
            "name" => Some(SortValue::Text(&self.name)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_keeps_unknown_fields() {
        let raw = json!({
            "name": "Joe's",
            "description": "diner",
            "category": "restaurant",
            "address": "12 Main St"
        });
        let business: Business = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(business.category, Category::Restaurant);
        assert_eq!(business.extra.get("address"), Some(&json!("12 Main St")));
        assert_eq!(serde_json::to_value(&business).unwrap(), raw);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let raw = json!({"name": "X", "description": "", "category": "casino"});
        assert!(serde_json::from_value::<Business>(raw).is_err());
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let business = Business::new("", "nothing", Category::Shopping);
        assert_eq!(
            business.validate().unwrap_err().to_string(),
            "'name' is a required value"
        );
    }

    #[test]
    fn test_sort_values() {
        let business = Business::new("Joe's", "diner", Category::Nightlife);
        assert_eq!(business.sort_value("category"), Some(SortValue::Text("nightlife")));
        assert_eq!(business.sort_value("name"), Some(SortValue::Text("Joe's")));
        assert_eq!(business.sort_value("rating"), None);
    }
}
