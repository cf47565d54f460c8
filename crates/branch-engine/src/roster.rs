//! Branch executive roster.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::listing::DisplayOrdered;

pub const EXECUTIVE_ROLES: [&str; 11] = [
    "President",
    "Past President",
    "1st Vice President",
    "2nd Vice President",
    "3rd Vice President",
    "Secretary",
    "Treasurer",
    "Executive",
    "Sgt at Arms",
    "Chaplain",
    "Service Officer",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executive {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub responsibility: String,
    #[serde(default)]
    pub order: u32,
}

impl Executive {
    pub fn new(name: &str, role: &str, responsibility: &str, order: u32) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(EngineError::MissingField("name"));
        }
        if role.trim().is_empty() {
            return Err(EngineError::MissingField("role"));
        }
        Ok(Self {
            name: name.trim().to_string(),
            role: role.trim().to_string(),
            responsibility: responsibility.trim().to_string(),
            order,
        })
    }

    /// Whether `role` is one of [`EXECUTIVE_ROLES`].
    pub fn has_known_role(&self) -> bool {
        EXECUTIVE_ROLES.contains(&self.role.as_str())
    }
}

impl DisplayOrdered for Executive {
    fn display_order(&self) -> u32 {
        self.order
    }
}

/// The roster loaded by the one-time seed command.
pub fn default_roster() -> Vec<Executive> {
    [
        ("President", "Gary Veley", "Sports"),
        ("Past President", "Leo Lund", "Housing"),
        ("1st Vice President", "John Price", "Veterans Services Officer"),
        ("2nd Vice President", "Joan Campbell", "Membership / H&A"),
        ("3rd Vice President", "David Price", "Finance"),
        ("Secretary", "Kathleen (Katie) O'Connor", "Entertainment"),
        ("Executive", "Holly Thompson", "Seniors"),
        ("Executive", "Marlene Scoutan", "Lotto"),
        ("Executive", "Tracy Gray", "Sick and Visiting"),
        ("Executive", "Merrill Gooderham", "Poppy / Cadets"),
        ("Executive", "Jean Blain", "Sgt at Arms, LA"),
        ("Executive", "Melissa O'Meara", "PRO"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((role, name, responsibility), order)| Executive {
        name: name.to_string(),
        role: role.to_string(),
        responsibility: responsibility.to_string(),
        order,
    })
    .collect()
}
