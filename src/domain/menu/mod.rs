// ============================================================================
// Menu Domain - Dishes and their identifiers
// ============================================================================
//
// - Value objects (Dish, Menu, DishIdAllocation)
// - Errors (MenuError)
// - Registry (MenuRegistry: id allocation, add/remove, availability)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod registry;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use registry::*;
