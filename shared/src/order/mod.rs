//! Order types
//!
//! The live order document and its line items, plus the input shapes
//! used when placing an order. Price arithmetic lives server-side; the
//! types here only carry the persisted/wire representation.

pub mod status;
pub mod types;

pub use status::{ItemStatus, ParseItemStatusError};
pub use types::{
    DishAddon, DishAddonInput, DishVariant, Order, OrderItem, OrderItemInput, PlaceOrderInput,
};
