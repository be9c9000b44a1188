//! Order and line-item shapes
//!
//! Monetary fields are `f64` on the wire; all arithmetic happens in
//! `Decimal` on the server and is rounded to 2 decimal places before
//! being stored back into these types.

use super::ItemStatus;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Mutually-exclusive priced option for a dish (e.g. size)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct DishVariant {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub price: f64,
}

/// Optional paid add-on attached to a line item
///
/// Addons carry a stable generated ID so removals address them by
/// identity, never by position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DishAddon {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// One ordered dish instance inside an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Stable identity (uuid v4), assigned at merge time
    pub id: String,
    pub dish_name: String,
    pub dish_category: String,
    pub quantity: u32,
    /// Per-unit catalog price before variant/addons
    pub base_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<DishVariant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<DishAddon>,
    /// Line total: (base + variant + Σaddons) × quantity
    pub price: f64,
    pub status: ItemStatus,
}

/// One table's open bill for one business day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// uuid v4
    pub id: String,
    pub venue_id: String,
    pub table_id: String,
    pub customer_name: String,
    /// Insertion order = display order
    pub items: Vec<OrderItem>,
    /// Append-only free text; merges concatenate, never replace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_request: Option<String>,
    /// Always equals the sum of `items[].price`
    pub total_price: f64,
    /// Bumped on every mutation; basis for optimistic concurrency
    pub version: u64,
    /// Unix millis
    pub created_at: i64,
    /// "YYYY-MM-DD" in the business timezone; the merge-bucketing key
    pub business_day: String,
}

impl Order {
    /// Find a line item by its stable ID
    pub fn find_item(&self, item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn find_item_mut(&mut self, item_id: &str) -> Option<&mut OrderItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    /// At least one item still occupies the kitchen pipeline
    ///
    /// An order with no live items no longer attracts merges.
    pub fn has_live_item(&self) -> bool {
        self.items.iter().any(|i| i.status.is_live())
    }
}

// ============================================================================
// Placement inputs
// ============================================================================

/// Addon selection as submitted by the client (ID assigned server-side)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DishAddonInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub price: f64,
}

/// One dish submission inside a placement
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemInput {
    #[validate(length(min = 1, max = 200))]
    pub dish_name: String,
    #[validate(length(min = 1, max = 200))]
    pub dish_category: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    pub base_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub variant: Option<DishVariant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub addons: Vec<DishAddonInput>,
}

/// Full placement request as handed to the order aggregator
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlaceOrderInput {
    #[validate(length(min = 1, max = 200))]
    pub venue_id: String,
    #[validate(length(min = 1, max = 200))]
    pub table_id: String,
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderItemInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500))]
    pub cooking_request: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PlaceOrderInput {
        PlaceOrderInput {
            venue_id: "v-1".to_string(),
            table_id: "t-1".to_string(),
            customer_name: "Asha".to_string(),
            items: vec![OrderItemInput {
                dish_name: "Dosa".to_string(),
                dish_category: "Mains".to_string(),
                quantity: 1,
                base_price: 120.0,
                variant: None,
                addons: vec![],
            }],
            cooking_request: None,
        }
    }

    #[test]
    fn placement_input_validates() {
        assert!(input().validate().is_ok());

        let mut bad = input();
        bad.venue_id = String::new();
        assert!(bad.validate().is_err());

        let mut bad = input();
        bad.items.clear();
        assert!(bad.validate().is_err());

        let mut bad = input();
        bad.items[0].quantity = 0;
        assert!(bad.validate().is_err());
    }
}
