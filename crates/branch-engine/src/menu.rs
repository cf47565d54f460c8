//! Food service menu items.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Categories offered in the admin form, in menu order.
pub const MENU_CATEGORIES: [&str; 7] = [
    "Entrees",
    "Appetizers",
    "Soup & Salads",
    "Hand Holds & Burgers",
    "Combos",
    "Sides",
    "Beverages",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl MenuItem {
    pub fn new(name: &str, price: &str, category: &str, description: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(EngineError::MissingField("name"));
        }
        if category.trim().is_empty() {
            return Err(EngineError::MissingField("category"));
        }
        Ok(Self {
            name: name.trim().to_string(),
            price: parse_price(price)?,
            category: category.trim().to_string(),
            description: description.trim().to_string(),
        })
    }
}

/// Parse a price as typed in the form; a leading `$` is accepted.
pub fn parse_price(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    match digits.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(EngineError::InvalidPrice(raw.to_string())),
    }
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Anything filed under a menu category.
pub trait Categorized {
    fn category(&self) -> &str;
}

impl Categorized for MenuItem {
    fn category(&self) -> &str {
        &self.category
    }
}

/// Group items by category. Categories appear in first-seen order; items keep input order.
pub fn group_by_category<T: Categorized>(items: &[T]) -> Vec<(&str, Vec<&T>)> {
    let mut groups: Vec<(&str, Vec<&T>)> = Vec::new();
    for item in items {
        match groups
            .iter_mut()
            .find(|(category, _)| *category == item.category())
        {
            Some((_, members)) => members.push(item),
            None => groups.push((item.category(), vec![item])),
        }
    }
    groups
}
