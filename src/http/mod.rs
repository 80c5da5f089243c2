// ============================================================================
// HTTP Boundary
// ============================================================================
//
// Thin mapping from routes to RestaurantService calls. All domain and
// persistence failures become `{"message": ...}` bodies via ApiError.
//
// ============================================================================

mod errors;
mod handlers;

use std::sync::Mutex;

use actix_web::web;

use crate::service::RestaurantService;

pub use errors::ApiError;

/// Application state shared by every worker. One mutation runs at a time.
pub type SharedService = web::Data<Mutex<RestaurantService>>;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(err.to_string()).into()
    }))
    .route("/menu", web::get().to(handlers::get_menu))
    .route("/menu/add", web::post().to(handlers::add_dish))
    .route("/menu/remove/{dish_id}", web::delete().to(handlers::remove_dish))
    .route(
        "/menu/update-availability/{dish_id}",
        web::put().to(handlers::update_availability),
    )
    .route("/order", web::post().to(handlers::place_order))
    .route(
        "/order/update-status/{order_id}",
        web::put().to(handlers::update_order_status),
    )
    .route("/orders", web::get().to(handlers::list_orders));
}
