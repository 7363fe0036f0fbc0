// storefront-cart/src/catalog/mod.rs

//! Product listing state for a storefront page: the active filters, the
//! sort order, the current page, and whether the filter drawer is open.

pub mod filters;

pub use filters::{filter_products, Page, ProductFilters, SortOrder};

use crate::model::Brand;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
  pub id: i64,
  pub name: String,
  pub slug: String,
  pub brand: Brand,
  pub price: f64,
  pub stock: i64,
  pub created_at: DateTime<Utc>,
}

/// View-model behind a product listing. Filter state is plain owned data
/// changed through the mutators on [`ProductFilters`].
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
  pub filters: ProductFilters,
  pub drawer_open: bool,
}

impl CatalogView {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn open_drawer(&mut self) {
    self.drawer_open = true;
  }

  pub fn close_drawer(&mut self) {
    self.drawer_open = false;
  }

  pub fn toggle_drawer(&mut self) {
    self.drawer_open = !self.drawer_open;
  }

  /// Current page of `products` under the active filters.
  pub fn page<'a>(&self, products: &'a [ProductSummary]) -> Page<&'a ProductSummary> {
    filter_products(products, &self.filters)
  }
}
