use std::sync::Arc;

use crate::domain::menu::{DishId, DishIdAllocation, Menu, MenuError, MenuRegistry};
use crate::domain::order::{
    ItemRef, Order, OrderError, OrderFilter, OrderId, OrderLedger, OrderStatus, OrderView,
};
use crate::metrics::{Metrics, OUTCOME_OK, OUTCOME_PERSISTENCE_FAILURE, OUTCOME_REJECTED};
use crate::persistence::{PersistenceError, Store};

// ============================================================================
// Restaurant Service
// ============================================================================
//
// Orchestrates: Request → Registry/Ledger → in-memory state → Store
//
// Every mutation is followed by a synchronous save of the full snapshot.
// A failed save fails the request but does not roll back memory: the next
// successful save (or the shutdown flush) catches the files up.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Failed to persist restaurant data: {0}")]
    Persistence(#[from] PersistenceError),
}

pub struct RestaurantService {
    menu: MenuRegistry,
    orders: OrderLedger,
    store: Box<dyn Store>,
    metrics: Arc<Metrics>,
}

impl RestaurantService {
    /// Build the service from whatever the store currently holds.
    pub fn open(store: Box<dyn Store>, allocation: DishIdAllocation, metrics: Arc<Metrics>) -> Self {
        let snapshot = store.load();
        let service = Self {
            menu: MenuRegistry::new(snapshot.menu, allocation),
            orders: OrderLedger::new(snapshot.orders),
            store,
            metrics,
        };
        service.update_gauges();

        tracing::info!(
            dishes = service.menu.len(),
            orders = service.orders.len(),
            dish_ids = %allocation,
            "Restaurant service ready"
        );

        service
    }

    pub fn add_dish(
        &mut self,
        name: String,
        price: f64,
        availability: Option<String>,
    ) -> Result<DishId, ServiceError> {
        let result = self.menu.add_dish(name, price, availability);
        let dish_id = self.finish("add_dish", result)?;

        tracing::info!(dish_id, "Dish added to menu");
        Ok(dish_id)
    }

    pub fn remove_dish(&mut self, dish_id: DishId) -> Result<(), ServiceError> {
        let result = self.menu.remove_dish(dish_id);
        self.finish("remove_dish", result)?;

        tracing::info!(dish_id, "Dish removed from menu");
        Ok(())
    }

    pub fn set_availability(
        &mut self,
        dish_id: DishId,
        availability: String,
    ) -> Result<(), ServiceError> {
        let result = self.menu.set_availability(dish_id, availability);
        self.finish("set_availability", result)?;

        tracing::info!(dish_id, "Dish availability updated");
        Ok(())
    }

    pub fn menu(&self) -> &Menu {
        self.menu.menu()
    }

    pub fn place_order(
        &mut self,
        customer_name: String,
        items: &[ItemRef],
    ) -> Result<Order, ServiceError> {
        let result = self.orders.place_order(customer_name, items, self.menu.menu());
        let order = self.finish("place_order", result)?;

        tracing::info!(
            order_id = order.order_id,
            lines = order.items.len(),
            requested = items.len(),
            total_amount = order.total_amount,
            "Order received"
        );
        Ok(order)
    }

    pub fn update_status(
        &mut self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), ServiceError> {
        let status_text = status.to_string();
        let result = self.orders.update_status(order_id, status);
        self.finish("update_status", result)?;

        tracing::info!(order_id, status = %status_text, "Order status updated");
        Ok(())
    }

    pub fn list_orders(&self, filter: OrderFilter) -> Vec<OrderView> {
        self.orders.list_orders(filter, self.menu.menu())
    }

    /// Write the current state regardless of whether anything changed.
    pub fn flush(&self) -> Result<(), ServiceError> {
        self.persist()?;
        Ok(())
    }

    /// Record the outcome of a domain mutation and persist it on success.
    fn finish<T, E>(&self, operation: &str, result: Result<T, E>) -> Result<T, ServiceError>
    where
        E: Into<ServiceError> + std::fmt::Display,
    {
        let value = match result {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(operation, reason = %e, "Request rejected");
                self.metrics.record_operation(operation, OUTCOME_REJECTED);
                return Err(e.into());
            }
        };

        self.update_gauges();

        if let Err(e) = self.persist() {
            tracing::error!(operation, error = %e, "Mutation applied in memory but not persisted");
            self.metrics
                .record_operation(operation, OUTCOME_PERSISTENCE_FAILURE);
            return Err(e.into());
        }

        self.metrics.record_operation(operation, OUTCOME_OK);
        Ok(value)
    }

    fn persist(&self) -> Result<(), PersistenceError> {
        let timer = self.metrics.persistence_write_duration.start_timer();
        let result = self.store.save(self.menu.menu(), self.orders.orders());
        timer.observe_duration();

        let outcome = if result.is_ok() { OUTCOME_OK } else { OUTCOME_PERSISTENCE_FAILURE };
        self.metrics
            .persistence_writes_total
            .with_label_values(&[outcome])
            .inc();

        result
    }

    fn update_gauges(&self) {
        self.metrics.set_sizes(self.menu.len(), self.orders.len());
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::order::OrderLog;
    use crate::persistence::{JsonFileStore, Snapshot};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// In-memory store that can be told to fail its writes.
    #[derive(Default)]
    pub(crate) struct FlakyStore {
        pub fail: AtomicBool,
        pub saves: AtomicUsize,
    }

    impl Store for Arc<FlakyStore> {
        fn load(&self) -> Snapshot {
            Snapshot::default()
        }

        fn save(&self, _menu: &Menu, _orders: &OrderLog) -> Result<(), PersistenceError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(PersistenceError::Io {
                    path: "flaky".into(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn metrics() -> Arc<Metrics> {
        Arc::new(Metrics::new().unwrap())
    }

    fn flaky_service() -> (RestaurantService, Arc<FlakyStore>) {
        let store = Arc::new(FlakyStore::default());
        let service = RestaurantService::open(
            Box::new(store.clone()),
            DishIdAllocation::default(),
            metrics(),
        );
        (service, store)
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let (mut service, store) = flaky_service();

        service.add_dish("Dish1".to_string(), 10.99, None).unwrap();
        service.set_availability(1, "no".to_string()).unwrap();
        service.place_order("Alice".to_string(), &[ItemRef::Dish(1)]).unwrap();
        service.update_status(1, OrderStatus::Preparing).unwrap();
        service.remove_dish(1).unwrap();

        assert_eq!(store.saves.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_rejected_mutation_is_not_persisted() {
        let (mut service, store) = flaky_service();

        let result = service.remove_dish(1);
        assert!(matches!(result, Err(ServiceError::Menu(MenuError::NotFound(1)))));

        let result = service.place_order("Bob".to_string(), &[ItemRef::Invalid]);
        assert!(matches!(result, Err(ServiceError::Order(OrderError::NoValidItems))));

        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_persistence_failure_is_reported_and_memory_kept() {
        let (mut service, store) = flaky_service();
        store.fail.store(true, Ordering::SeqCst);

        let result = service.add_dish("Dish1".to_string(), 10.99, None);
        assert!(matches!(result, Err(ServiceError::Persistence(_))));
        assert!(service.menu().contains_key(&1));

        store.fail.store(false, Ordering::SeqCst);
        service.flush().unwrap();
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_view_uses_live_menu_while_total_is_historical() {
        let (mut service, _store) = flaky_service();
        service.add_dish("Dish1".to_string(), 10.99, None).unwrap();

        let order = service
            .place_order("Alice".to_string(), &[ItemRef::Dish(1)])
            .unwrap();
        assert_eq!(order.total_amount, 10.99);

        // Re-price by removing and re-adding under the same id
        service.remove_dish(1).unwrap();
        service.add_dish("Dish1 (large)".to_string(), 13.49, None).unwrap();

        let views = service.list_orders(OrderFilter::All);
        assert_eq!(views[0].items[0].price, 13.49);
        assert_eq!(views[0].items[0].dish_name, "Dish1 (large)");
        assert_eq!(service.orders.get(1).unwrap().total_amount, 10.99);
    }

    #[test]
    fn test_state_survives_restart() {
        let dir = TempDir::new().unwrap();
        let store = || {
            Box::new(JsonFileStore::new(
                dir.path().join("menu_data.json"),
                dir.path().join("orders_data.json"),
            ))
        };

        let mut service = RestaurantService::open(store(), DishIdAllocation::default(), metrics());
        service.add_dish("Dish1".to_string(), 10.99, None).unwrap();
        service.add_dish("Dish2".to_string(), 15.99, None).unwrap();
        service
            .place_order("Alice".to_string(), &[ItemRef::Dish(1), ItemRef::Dish(2)])
            .unwrap();
        drop(service);

        let reopened = RestaurantService::open(store(), DishIdAllocation::default(), metrics());
        assert_eq!(reopened.menu().len(), 2);
        assert_eq!(reopened.orders.get(1).unwrap().total_amount, 26.98);
    }

    #[test]
    fn test_operation_metrics_by_outcome() {
        let metrics = metrics();
        let store = Arc::new(FlakyStore::default());
        let mut service =
            RestaurantService::open(Box::new(store), DishIdAllocation::default(), metrics.clone());

        service.add_dish("Dish1".to_string(), 1.0, None).unwrap();
        let _ = service.remove_dish(9);

        let ok = metrics
            .operations_total
            .with_label_values(&["add_dish", OUTCOME_OK])
            .get();
        let rejected = metrics
            .operations_total
            .with_label_values(&["remove_dish", OUTCOME_REJECTED])
            .get();
        assert_eq!((ok, rejected), (1, 1));
        assert_eq!(metrics.menu_dishes.get(), 1);
    }
}
