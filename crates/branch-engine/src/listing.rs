//! Admin-ordered listings: rental rooms and event posters.
//!
//! Both carry a 1-based display `order`. A blank or zero order from the form
//! means "append", which is the current count plus one.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A record shown in admin-chosen order.
pub trait DisplayOrdered {
    fn display_order(&self) -> u32;
}

/// Stable sort by display order; ties keep their stored order.
pub fn sort_by_display_order<T: DisplayOrdered>(items: &mut [T]) {
    items.sort_by_key(T::display_order);
}

/// Order given to a new record when none was entered.
pub fn next_display_order(existing: usize) -> u32 {
    u32::try_from(existing).map_or(u32::MAX, |n| n.saturating_add(1))
}

fn resolve_order(requested: Option<u32>, existing: usize) -> u32 {
    match requested {
        Some(order) if order > 0 => order,
        _ => next_display_order(existing),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub name: String,
    pub description: String,
    /// Free text, e.g. "$150 / evening".
    pub cost: String,
    pub order: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Room {
    pub fn new(
        name: &str,
        description: &str,
        cost: &str,
        order: Option<u32>,
        image_url: Option<String>,
        existing: usize,
    ) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(EngineError::MissingField("name"));
        }
        Ok(Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            cost: cost.trim().to_string(),
            order: resolve_order(order, existing),
            image_url: image_url.filter(|url| !url.trim().is_empty()),
        })
    }
}

impl DisplayOrdered for Room {
    fn display_order(&self) -> u32 {
        self.order
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poster {
    #[serde(default)]
    pub title: String,
    pub order: u32,
    pub image_url: String,
}

impl Poster {
    pub fn new(title: &str, order: Option<u32>, image_url: &str, existing: usize) -> Result<Self> {
        if image_url.trim().is_empty() {
            return Err(EngineError::MissingField("image"));
        }
        Ok(Self {
            title: title.trim().to_string(),
            order: resolve_order(order, existing),
            image_url: image_url.trim().to_string(),
        })
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

impl DisplayOrdered for Poster {
    fn display_order(&self) -> u32 {
        self.order
    }
}
