use super::value_objects::DishId;

// ============================================================================
// Menu Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MenuError {
    #[error("Dish with ID {0} not found in the menu.")]
    NotFound(DishId),

    #[error("Dish with ID {0} already exists.")]
    DuplicateId(DishId),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown dish id allocation '{0}' (expected 'count' or 'monotonic')")]
pub struct UnknownAllocation(pub String);
