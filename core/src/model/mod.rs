// storefront-cart/src/model/mod.rs

//! Cart line items and the totals derived from them.

pub mod cart_item;
pub mod totals;

pub use cart_item::{Brand, CartItem, VariantId};
pub use totals::CartTotals;
