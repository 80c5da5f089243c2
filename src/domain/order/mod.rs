// ============================================================================
// Order Domain - Business Logic for the Order Ledger
// ============================================================================
//
// - Value objects (Order, OrderItem, OrderStatus, OrderFilter, OrderView)
// - Errors (OrderError enum)
// - Ledger (OrderLedger: placement, status updates, filtered views)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod ledger;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use ledger::*;
