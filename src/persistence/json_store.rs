use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::{PersistenceError, Snapshot, Store};
use crate::domain::menu::Menu;
use crate::domain::order::OrderLog;

// ============================================================================
// JSON File Store - one file for the menu, one for the order log
// ============================================================================

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    menu_path: PathBuf,
    orders_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(menu_path: impl Into<PathBuf>, orders_path: impl Into<PathBuf>) -> Self {
        Self {
            menu_path: menu_path.into(),
            orders_path: orders_path.into(),
        }
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Snapshot {
        let snapshot = Snapshot {
            menu: read_or_default(&self.menu_path),
            orders: read_or_default(&self.orders_path),
        };

        tracing::info!(
            menu_file = %self.menu_path.display(),
            orders_file = %self.orders_path.display(),
            dishes = snapshot.menu.len(),
            orders = snapshot.orders.len(),
            "Loaded restaurant data"
        );

        snapshot
    }

    fn save(&self, menu: &Menu, orders: &OrderLog) -> Result<(), PersistenceError> {
        write_json(&self.menu_path, menu)?;
        write_json(&self.orders_path, orders)?;

        tracing::debug!(
            dishes = menu.len(),
            orders = orders.len(),
            "Persisted restaurant data"
        );

        Ok(())
    }
}

fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(file = %path.display(), "No data file yet, starting empty");
            return T::default();
        }
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "Cannot read data file, starting empty");
            return T::default();
        }
    };

    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        tracing::warn!(file = %path.display(), error = %e, "Malformed data file, starting empty");
        T::default()
    })
}

/// Write `value` as 4-space-indented JSON via a sibling temp file, so a
/// crash mid-write leaves the previous file intact. A failed write removes
/// its temp file.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;

    let tmp = temp_path(path);
    if let Err(source) = fs::write(&tmp, &buffer) {
        discard(&tmp);
        return Err(PersistenceError::Io { path: tmp, source });
    }
    fs::rename(&tmp, path).map_err(|source| {
        discard(&tmp);
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn discard(tmp: &Path) {
    if let Err(e) = fs::remove_file(tmp) {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!(file = %tmp.display(), error = %e, "Cannot remove temp file");
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu::Dish;
    use crate::domain::order::{Order, OrderItem, OrderStatus};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("menu.json"), dir.path().join("orders.json"))
    }

    fn sample_orders() -> OrderLog {
        vec![Order {
            order_id: 1,
            customer_name: "Alice".to_string(),
            items: vec![OrderItem {
                dish_id: 1,
                name: Some("Soup".to_string()),
                price: 4.5,
            }],
            status: OrderStatus::Ready,
            total_amount: 4.5,
        }]
    }

    #[test]
    fn test_missing_files_load_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir).load(), Snapshot::default());
    }

    #[test]
    fn test_malformed_file_loads_empty_independently() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut menu = Menu::new();
        menu.insert(1, Dish::new("Soup", 4.5, "yes"));
        store.save(&menu, &sample_orders()).unwrap();
        fs::write(dir.path().join("menu.json"), b"{not json").unwrap();

        let snapshot = store.load();
        assert!(snapshot.menu.is_empty());
        assert_eq!(snapshot.orders, sample_orders());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut menu = Menu::new();
        menu.insert(1, Dish::new("Soup", 4.5, "yes"));
        menu.insert(3, Dish::new("Tea", 2.0, "no"));
        store.save(&menu, &sample_orders()).unwrap();

        let snapshot = store.load();
        assert_eq!(snapshot.menu, menu);
        assert_eq!(snapshot.orders, sample_orders());
        assert!(!dir.path().join("menu.json.tmp").exists());
    }

    #[test]
    fn test_menu_file_layout() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut menu = Menu::new();
        menu.insert(2, Dish::new("Soup", 4.5, "yes"));
        store.save(&menu, &OrderLog::new()).unwrap();

        let text = fs::read_to_string(dir.path().join("menu.json")).unwrap();
        assert!(text.contains("\n    \"2\": {"));

        let orders = fs::read_to_string(dir.path().join("orders.json")).unwrap();
        assert_eq!(orders, "[]");
    }

    #[test]
    fn test_null_status_record_keeps_whole_log() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("orders.json"),
            r#"[
    {"order_id": 1, "customer_name": "A", "items": [{"dish_id": 1, "name": "Soup", "price": 4.5}],
     "status": "ready", "total_amount": 4.5},
    {"order_id": 2, "customer_name": "B", "items": [{"dish_id": 1, "name": "Soup", "price": 4.5}],
     "status": null, "total_amount": 4.5}
]"#,
        )
        .unwrap();

        let snapshot = store_in(&dir).load();
        assert_eq!(snapshot.orders.len(), 2);
        assert_eq!(snapshot.orders[0].status, OrderStatus::Ready);
        assert_eq!(snapshot.orders[1].status, OrderStatus::Other(String::new()));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        // A non-empty directory where the menu file should go blocks the rename
        fs::create_dir_all(dir.path().join("menu.json").join("blocker")).unwrap();

        let result = store.save(&Menu::new(), &OrderLog::new());
        assert!(matches!(result, Err(PersistenceError::Io { .. })));
        assert!(!dir.path().join("menu.json.tmp").exists());
        assert!(!dir.path().join("orders.json").exists());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(
            dir.path().join("nope").join("menu.json"),
            dir.path().join("orders.json"),
        );

        let result = store.save(&Menu::new(), &OrderLog::new());
        assert!(matches!(result, Err(PersistenceError::Io { .. })));
    }
}
