use std::sync::MutexGuard;

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use super::{ApiError, SharedService};
use crate::domain::menu::DishId;
use crate::domain::order::{ItemRef, OrderFilter, OrderId, OrderStatus};
use crate::service::RestaurantService;

// ============================================================================
// Request Bodies
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AddDishRequest {
    pub name: String,
    pub price: f64,
    pub availability: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub availability: String,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub customer_name: String,
    /// Raw JSON values: anything that is not an integer id is dropped.
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
}

fn lock(state: &SharedService) -> Result<MutexGuard<'_, RestaurantService>, ApiError> {
    state.lock().map_err(|_| {
        tracing::error!("Restaurant state lock poisoned");
        ApiError::StatePoisoned
    })
}

// ============================================================================
// Menu Handlers
// ============================================================================

pub async fn add_dish(
    state: SharedService,
    body: web::Json<AddDishRequest>,
) -> Result<HttpResponse, ApiError> {
    let AddDishRequest { name, price, availability } = body.into_inner();
    let dish_id = lock(&state)?.add_dish(name, price, availability)?;

    Ok(HttpResponse::Created().json(json!({
        "message": format!("Dish with ID {dish_id} has been added to the menu."),
        "dish_id": dish_id,
    })))
}

pub async fn remove_dish(
    state: SharedService,
    path: web::Path<DishId>,
) -> Result<HttpResponse, ApiError> {
    let dish_id = path.into_inner();
    lock(&state)?.remove_dish(dish_id)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Dish with ID {dish_id} has been removed from the menu."),
    })))
}

pub async fn update_availability(
    state: SharedService,
    path: web::Path<DishId>,
    body: web::Json<AvailabilityRequest>,
) -> Result<HttpResponse, ApiError> {
    let dish_id = path.into_inner();
    lock(&state)?.set_availability(dish_id, body.into_inner().availability)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Availability of dish with ID {dish_id} has been updated."),
    })))
}

pub async fn get_menu(state: SharedService) -> Result<HttpResponse, ApiError> {
    let service = lock(&state)?;
    Ok(HttpResponse::Ok().json(service.menu()))
}

// ============================================================================
// Order Handlers
// ============================================================================

pub async fn place_order(
    state: SharedService,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, ApiError> {
    let PlaceOrderRequest { customer_name, items } = body.into_inner();
    let requested: Vec<ItemRef> = items.iter().map(ItemRef::from).collect();

    let order = lock(&state)?.place_order(customer_name, &requested)?;

    Ok(HttpResponse::Created().json(json!({
        "message": format!(
            "Order with ID {} has been received. Total amount: ${:.2}",
            order.order_id, order.total_amount
        ),
        "order_id": order.order_id,
        "total_amount": order.total_amount,
    })))
}

pub async fn update_order_status(
    state: SharedService,
    path: web::Path<OrderId>,
    body: web::Json<StatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    let status = OrderStatus::from(body.into_inner().status);
    lock(&state)?.update_status(order_id, status)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Status of order with ID {order_id} has been updated."),
    })))
}

pub async fn list_orders(
    state: SharedService,
    query: web::Query<OrdersQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter: OrderFilter = query.status.as_deref().unwrap_or("all").parse()?;
    let views = lock(&state)?.list_orders(filter);

    Ok(HttpResponse::Ok().json(views))
}

// ============================================================================
// Handler Tests
// ============================================================================
