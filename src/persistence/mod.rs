// ============================================================================
// Persistence Gateway
// ============================================================================
//
// The service loads one snapshot at startup and rewrites the whole thing
// after every mutation. `Store` is the seam; `JsonFileStore` is the
// production implementation.
//
// ============================================================================

mod json_store;

use std::path::PathBuf;

use crate::domain::menu::Menu;
use crate::domain::order::OrderLog;

pub use json_store::JsonFileStore;

/// Everything the service keeps between restarts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub menu: Menu,
    pub orders: OrderLog,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait Store: Send + Sync {
    /// Never fails: unreadable or malformed data loads as empty.
    fn load(&self) -> Snapshot;

    /// Rewrite the menu and the order log. The two writes are independent:
    /// if the second one fails the first stays on disk and nothing is
    /// rolled back, so the files can briefly disagree until the next save.
    fn save(&self, menu: &Menu, orders: &OrderLog) -> Result<(), PersistenceError>;
}
