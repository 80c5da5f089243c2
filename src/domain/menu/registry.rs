use super::errors::MenuError;
use super::value_objects::{Dish, DishId, DishIdAllocation, Menu, DEFAULT_AVAILABILITY};

// ============================================================================
// Menu Registry - Owns the menu for the lifetime of the process
// ============================================================================
//
// Business rules:
// 1. New ids come from the configured DishIdAllocation
// 2. An allocated id that is already taken is rejected, never overwritten
// 3. Removal never renumbers the remaining dishes
// 4. Availability is free text and is stored as given
//
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MenuRegistry {
    dishes: Menu,
    allocation: DishIdAllocation,
}

impl MenuRegistry {
    pub fn new(dishes: Menu, allocation: DishIdAllocation) -> Self {
        Self { dishes, allocation }
    }

    /// Add a dish under the next allocated id and return that id.
    pub fn add_dish(
        &mut self,
        name: String,
        price: f64,
        availability: Option<String>,
    ) -> Result<DishId, MenuError> {
        let dish_id = self.allocation.next_id(&self.dishes);

        if self.dishes.contains_key(&dish_id) {
            return Err(MenuError::DuplicateId(dish_id));
        }

        let availability = availability.unwrap_or_else(|| DEFAULT_AVAILABILITY.to_string());
        self.dishes.insert(dish_id, Dish::new(name, price, availability));

        Ok(dish_id)
    }

    pub fn remove_dish(&mut self, dish_id: DishId) -> Result<Dish, MenuError> {
        self.dishes
            .remove(&dish_id)
            .ok_or(MenuError::NotFound(dish_id))
    }

    pub fn set_availability(
        &mut self,
        dish_id: DishId,
        availability: String,
    ) -> Result<(), MenuError> {
        let dish = self
            .dishes
            .get_mut(&dish_id)
            .ok_or(MenuError::NotFound(dish_id))?;
        dish.availability = availability;
        Ok(())
    }

    pub fn menu(&self) -> &Menu {
        &self.dishes
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
