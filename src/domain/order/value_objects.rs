use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::OrderError;
use crate::domain::menu::DishId;

// ============================================================================
// Order Value Objects
// ============================================================================

pub type OrderId = u32;

/// Append-only; position `n` holds the order with id `n + 1`.
pub type OrderLog = Vec<Order>;

/// Frozen copy of a dish taken when the order was placed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderItem {
    pub dish_id: DishId,
    pub name: Option<String>,
    pub price: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Order {
    pub order_id: OrderId,
    #[serde(default, deserialize_with = "crate::domain::null_as_empty")]
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total_amount: f64,
}

/// Order status. The named states are the ones the kitchen uses, but any
/// text is a legal status and no transition is ever rejected. A `null`
/// status in an older snapshot reads as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum OrderStatus {
    Received,
    Preparing,
    Ready,
    Delivered,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Received => "received",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "received" => OrderStatus::Received,
            "preparing" => OrderStatus::Preparing,
            "ready" => OrderStatus::Ready,
            "delivered" => OrderStatus::Delivered,
            _ => OrderStatus::Other(s),
        }
    }
}

impl From<Option<String>> for OrderStatus {
    fn from(s: Option<String>) -> Self {
        OrderStatus::from(s.unwrap_or_default())
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        OrderStatus::from(s.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(s) => s,
            named => named.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which orders `list_orders` selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderFilter {
    #[default]
    All,
    Preparing,
    Ready,
    Delivered,
}

impl OrderFilter {
    pub fn matches(self, status: &OrderStatus) -> bool {
        match self {
            OrderFilter::All => true,
            OrderFilter::Preparing => *status == OrderStatus::Preparing,
            OrderFilter::Ready => *status == OrderStatus::Ready,
            OrderFilter::Delivered => *status == OrderStatus::Delivered,
        }
    }
}

impl FromStr for OrderFilter {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(OrderFilter::All),
            "preparing" => Ok(OrderFilter::Preparing),
            "ready" => Ok(OrderFilter::Ready),
            "delivered" => Ok(OrderFilter::Delivered),
            other => Err(OrderError::UnknownFilter(other.to_string())),
        }
    }
}

/// One requested line of a new order, as it arrived on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRef {
    Dish(DishId),
    /// Anything that is not a non-negative integer id; never accepted.
    Invalid,
}

impl From<&serde_json::Value> for ItemRef {
    fn from(value: &serde_json::Value) -> Self {
        value
            .as_u64()
            .and_then(|id| DishId::try_from(id).ok())
            .map_or(ItemRef::Invalid, ItemRef::Dish)
    }
}

impl From<DishId> for ItemRef {
    fn from(id: DishId) -> Self {
        ItemRef::Dish(id)
    }
}

/// A line of an [`OrderView`], resolved against the live menu.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ViewItem {
    pub dish_id: DishId,
    pub dish_name: String,
    pub price: f64,
}

/// Read-time projection of an order. Carries no total on purpose: the
/// stored `total_amount` is historical while these items are current.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderView {
    pub order_id: OrderId,
    pub customer_name: String,
    pub status: OrderStatus,
    pub items: Vec<ViewItem>,
}

// ============================================================================
// Unit Tests
// ============================================================================
