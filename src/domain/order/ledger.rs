use super::errors::OrderError;
use super::value_objects::*;
use crate::domain::menu::Menu;

// ============================================================================
// Order Ledger - Append-only log of customer orders
// ============================================================================
//
// Business rules:
// 1. A line is accepted iff its id is an integer present in the menu whose
//    availability marker is non-empty
// 2. Accepted lines are frozen copies of the dish; duplicates are kept
// 3. The total is summed left to right over accepted lines at placement
// 4. An order with no accepted lines is rejected and nothing is appended
// 5. Orders are never removed, so `count + 1` ids never repeat
// 6. Status is overwritten unconditionally
//
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct OrderLedger {
    orders: OrderLog,
}

impl OrderLedger {
    pub fn new(orders: OrderLog) -> Self {
        Self { orders }
    }

    /// Price the requested lines against `menu`, append the order and
    /// return a copy of it.
    pub fn place_order(
        &mut self,
        customer_name: String,
        requested: &[ItemRef],
        menu: &Menu,
    ) -> Result<Order, OrderError> {
        let items: Vec<OrderItem> = requested
            .iter()
            .filter_map(|item| match item {
                ItemRef::Dish(dish_id) => menu
                    .get(dish_id)
                    .filter(|dish| dish.is_available())
                    .map(|dish| OrderItem {
                        dish_id: *dish_id,
                        name: dish.name.clone(),
                        price: dish.price.unwrap_or(0.0),
                    }),
                ItemRef::Invalid => None,
            })
            .collect();

        if items.is_empty() {
            return Err(OrderError::NoValidItems);
        }

        let total_amount = items.iter().fold(0.0, |total, item| total + item.price);

        let order = Order {
            order_id: self.next_id(),
            customer_name,
            items,
            status: OrderStatus::Received,
            total_amount,
        };
        self.orders.push(order.clone());

        Ok(order)
    }

    pub fn update_status(
        &mut self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderError> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.order_id == order_id)
            .ok_or(OrderError::NotFound(order_id))?;
        order.status = status;
        Ok(())
    }

    /// Orders selected by `filter`, with their lines resolved against the
    /// current menu. Lines whose dish has since been removed are dropped.
    pub fn list_orders(&self, filter: OrderFilter, menu: &Menu) -> Vec<OrderView> {
        self.orders
            .iter()
            .filter(|order| filter.matches(&order.status))
            .map(|order| OrderView {
                order_id: order.order_id,
                customer_name: order.customer_name.clone(),
                status: order.status.clone(),
                items: order
                    .items
                    .iter()
                    .filter_map(|item| {
                        menu.get(&item.dish_id).map(|dish| ViewItem {
                            dish_id: item.dish_id,
                            dish_name: dish.name.clone().unwrap_or_else(|| "N/A".to_string()),
                            price: dish.price.unwrap_or(0.0),
                        })
                    })
                    .collect(),
            })
            .collect()
    }

    #[cfg(test)]
    pub fn get(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.order_id == order_id)
    }

    pub fn orders(&self) -> &OrderLog {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    fn next_id(&self) -> OrderId {
        (self.orders.len() as OrderId).saturating_add(1)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
