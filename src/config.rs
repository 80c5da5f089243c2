use std::path::PathBuf;

use anyhow::Context;

use crate::domain::menu::DishIdAllocation;

// ============================================================================
// Application Configuration
// ============================================================================
//
// Every setting has a default; environment variables override them:
//
//   RESTAURANT_HOST         bind address            (127.0.0.1)
//   RESTAURANT_PORT         bind port               (5000)
//   RESTAURANT_MENU_FILE    menu snapshot           (menu_data.json)
//   RESTAURANT_ORDERS_FILE  order log snapshot      (orders_data.json)
//   RESTAURANT_DISH_IDS     count | monotonic       (count)
//
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub menu_file: PathBuf,
    pub orders_file: PathBuf,
    pub dish_ids: DishIdAllocation,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            menu_file: PathBuf::from("menu_data.json"),
            orders_file: PathBuf::from("orders_data.json"),
            dish_ids: DishIdAllocation::CountPlusOne,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("RESTAURANT_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("RESTAURANT_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("RESTAURANT_PORT is not a valid port: {port}"))?;
        }
        if let Some(path) = lookup("RESTAURANT_MENU_FILE") {
            config.menu_file = PathBuf::from(path);
        }
        if let Some(path) = lookup("RESTAURANT_ORDERS_FILE") {
            config.orders_file = PathBuf::from(path);
        }
        if let Some(strategy) = lookup("RESTAURANT_DISH_IDS") {
            config.dish_ids = strategy.parse()?;
        }

        Ok(config)
    }
}
