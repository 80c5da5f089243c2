// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Two aggregates, each in its own subdirectory with:
// - Value objects
// - Errors
// - The component that owns and mutates the aggregate's state
//
// Nothing in here knows about HTTP or files. Persistence happens one layer
// up, in the service, after every successful mutation.
//
// ============================================================================

pub mod menu;
pub mod order;

use serde::{Deserialize, Deserializer};

/// Reads a JSON string that older snapshots may have stored as `null`.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
