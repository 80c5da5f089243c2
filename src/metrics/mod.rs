// Private module declaration
mod server;

use prometheus::{Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry};

// Re-export for public API
pub use server::configure;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Menu and order operations by outcome
// - Snapshot writes (count by outcome, latency)
// - Current menu and order log sizes
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_REJECTED: &str = "rejected";
pub const OUTCOME_PERSISTENCE_FAILURE: &str = "persistence_failure";

/// Central metrics registry for the entire application
pub struct Metrics {
    registry: Registry,

    pub operations_total: IntCounterVec,

    pub persistence_writes_total: IntCounterVec,
    pub persistence_write_duration: Histogram,

    pub menu_dishes: IntGauge,
    pub orders: IntGauge,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let operations_total = IntCounterVec::new(
            Opts::new("restaurant_operations_total", "Menu and order operations handled"),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(operations_total.clone()))?;

        let persistence_writes_total = IntCounterVec::new(
            Opts::new("restaurant_persistence_writes_total", "Snapshot writes"),
            &["outcome"],
        )?;
        registry.register(Box::new(persistence_writes_total.clone()))?;

        let persistence_write_duration = Histogram::with_opts(
            HistogramOpts::new(
                "restaurant_persistence_write_duration_seconds",
                "Time spent writing a full snapshot",
            )
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        )?;
        registry.register(Box::new(persistence_write_duration.clone()))?;

        let menu_dishes = IntGauge::new("restaurant_menu_dishes", "Dishes currently on the menu")?;
        registry.register(Box::new(menu_dishes.clone()))?;

        let orders = IntGauge::new("restaurant_orders", "Orders in the order log")?;
        registry.register(Box::new(orders.clone()))?;

        Ok(Self {
            registry,
            operations_total,
            persistence_writes_total,
            persistence_write_duration,
            menu_dishes,
            orders,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_operation(&self, operation: &str, outcome: &str) {
        self.operations_total
            .with_label_values(&[operation, outcome])
            .inc();
    }

    pub fn set_sizes(&self, dishes: usize, orders: usize) {
        self.menu_dishes.set(dishes as i64);
        self.orders.set(orders as i64);
    }
}
