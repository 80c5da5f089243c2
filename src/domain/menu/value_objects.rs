use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::UnknownAllocation;

// ============================================================================
// Menu Value Objects
// ============================================================================

pub type DishId = u32;

/// Dish id -> dish. Serialized as a JSON object keyed by the stringified id.
pub type Menu = BTreeMap<DishId, Dish>;

pub const DEFAULT_AVAILABILITY: &str = "yes";

/// A menu entry. The id lives in the enclosing [`Menu`] key.
///
/// `name` and `price` are optional only because snapshots written by older
/// deployments may lack them; the HTTP boundary always supplies both.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Dish {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "crate::domain::null_as_empty")]
    pub availability: String,
}

impl Dish {
    pub fn new(name: impl Into<String>, price: f64, availability: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            availability: availability.into(),
        }
    }

    /// Any non-empty marker counts as available, `"no"` included.
    pub fn is_available(&self) -> bool {
        !self.availability.is_empty()
    }
}

/// How the registry picks the id of the next dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DishIdAllocation {
    /// `count + 1`. Can land on an existing id once a dish has been removed.
    #[default]
    CountPlusOne,
    /// `max id + 1`. Never reuses an id still present in the menu.
    Monotonic,
}

impl DishIdAllocation {
    pub fn next_id(self, menu: &Menu) -> DishId {
        match self {
            DishIdAllocation::CountPlusOne => (menu.len() as DishId).saturating_add(1),
            DishIdAllocation::Monotonic => menu
                .keys()
                .next_back()
                .map_or(1, |max| max.saturating_add(1)),
        }
    }
}

impl FromStr for DishIdAllocation {
    type Err = UnknownAllocation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "count" => Ok(DishIdAllocation::CountPlusOne),
            "monotonic" => Ok(DishIdAllocation::Monotonic),
            other => Err(UnknownAllocation(other.to_string())),
        }
    }
}

impl fmt::Display for DishIdAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DishIdAllocation::CountPlusOne => write!(f, "count"),
            DishIdAllocation::Monotonic => write!(f, "monotonic"),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
