// storefront-cart/src/model/totals.rs

use serde::Serialize;

/// Aggregate price and unit count of a cart. Always derived from the lines,
/// never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CartTotals {
  pub price: f64,
  pub count: i64,
}
