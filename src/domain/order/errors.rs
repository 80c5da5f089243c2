use super::value_objects::OrderId;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Order with ID {0} not found.")]
    NotFound(OrderId),

    #[error("Invalid order items or item availability.")]
    NoValidItems,

    #[error("Unknown status filter: {0}")]
    UnknownFilter(String),
}
