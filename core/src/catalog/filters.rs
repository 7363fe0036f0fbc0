// storefront-cart/src/catalog/filters.rs

use super::ProductSummary;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
  #[default]
  Newest,
  PriceAsc,
  PriceDesc,
  NameAsc,
}

/// Active listing filters. Every filter change sends the listing back to
/// page 1; only [`ProductFilters::set_page`] moves between pages.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilters {
  pub search: String,
  pub brands: BTreeSet<String>,
  pub min_price: Option<f64>,
  pub max_price: Option<f64>,
  pub in_stock_only: bool,
  pub sort: SortOrder,
  /// 1-based.
  pub page: usize,
  pub page_size: usize,
}

impl Default for ProductFilters {
  fn default() -> Self {
    Self {
      search: String::new(),
      brands: BTreeSet::new(),
      min_price: None,
      max_price: None,
      in_stock_only: false,
      sort: SortOrder::default(),
      page: 1,
      page_size: DEFAULT_PAGE_SIZE,
    }
  }
}

impl ProductFilters {
  pub fn set_search(&mut self, search: impl Into<String>) {
    self.search = search.into();
    self.page = 1;
  }

  /// Adds the brand when absent, removes it when present.
  pub fn toggle_brand(&mut self, slug: impl Into<String>) {
    let slug = slug.into();
    if !self.brands.remove(&slug) {
      self.brands.insert(slug);
    }
    self.page = 1;
  }

  pub fn set_price_range(&mut self, min_price: Option<f64>, max_price: Option<f64>) {
    self.min_price = min_price;
    self.max_price = max_price;
    self.page = 1;
  }

  pub fn set_in_stock_only(&mut self, in_stock_only: bool) {
    self.in_stock_only = in_stock_only;
    self.page = 1;
  }

  pub fn set_sort(&mut self, sort: SortOrder) {
    self.sort = sort;
    self.page = 1;
  }

  /// Page 0 is treated as page 1.
  pub fn set_page(&mut self, page: usize) {
    self.page = page.max(1);
  }

  pub fn set_page_size(&mut self, page_size: usize) {
    self.page_size = page_size.max(1);
    self.page = 1;
  }

  /// Clears every filter, keeps the page size.
  pub fn reset(&mut self) {
    *self = Self {
      page_size: self.page_size,
      ..Self::default()
    };
  }

  pub fn matches(&self, product: &ProductSummary) -> bool {
    let needle = self.search.trim().to_lowercase();
    if !needle.is_empty()
      && !product.name.to_lowercase().contains(&needle)
      && !product.brand.name.to_lowercase().contains(&needle)
    {
      return false;
    }
    if !self.brands.is_empty() && !self.brands.contains(&product.brand.slug) {
      return false;
    }
    if self.min_price.map_or(false, |min| product.price < min) {
      return false;
    }
    if self.max_price.map_or(false, |max| product.price > max) {
      return false;
    }
    !(self.in_stock_only && product.stock <= 0)
  }

  fn compare(&self, a: &ProductSummary, b: &ProductSummary) -> Ordering {
    match self.sort {
      SortOrder::Newest => b.created_at.cmp(&a.created_at),
      SortOrder::PriceAsc => a.price.total_cmp(&b.price),
      SortOrder::PriceDesc => b.price.total_cmp(&a.price),
      SortOrder::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub items: Vec<T>,
  pub page: usize,
  pub page_size: usize,
  pub total_items: usize,
  pub total_pages: usize,
}

/// Filters, sorts (stable) and slices `products`. The requested page is
/// clamped to the last one; an empty result reports page 1 of 0.
pub fn filter_products<'a>(products: &'a [ProductSummary], filters: &ProductFilters) -> Page<&'a ProductSummary> {
  let mut matched: Vec<&ProductSummary> = products.iter().filter(|p| filters.matches(p)).collect();
  matched.sort_by(|a, b| filters.compare(a, b));

  let page_size = filters.page_size.max(1);
  let total_items = matched.len();
  let total_pages = total_items.div_ceil(page_size);
  let page = filters.page.clamp(1, total_pages.max(1));

  let items = matched.into_iter().skip((page - 1) * page_size).take(page_size).collect();

  Page {
    items,
    page,
    page_size,
    total_items,
    total_pages,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::Brand;
  use chrono::{TimeZone, Utc};

  fn product(id: i64, name: &str, brand: &str, price: f64, stock: i64, day: u32) -> ProductSummary {
    ProductSummary {
      id,
      name: name.to_string(),
      slug: name.to_lowercase().replace(' ', "-"),
      brand: Brand {
        name: brand.to_string(),
        slug: brand.to_lowercase(),
      },
      price,
      stock,
      created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
    }
  }

  fn catalog() -> Vec<ProductSummary> {
    vec![
      product(1, "Trail Runner", "Acme", 120.0, 4, 1),
      product(2, "City Sneaker", "Nimbus", 80.0, 0, 2),
      product(3, "Hiking Boot", "Acme", 150.0, 2, 3),
      product(4, "Sandal", "Nimbus", 35.0, 9, 4),
      product(5, "Road Racer", "Velo", 95.0, 1, 5),
    ]
  }

  fn ids(page: &Page<&ProductSummary>) -> Vec<i64> {
    page.items.iter().map(|p| p.id).collect()
  }

  #[test]
  fn default_sort_is_newest_first() {
    let products = catalog();
    let page = filter_products(&products, &ProductFilters::default());
    assert_eq!(ids(&page), vec![5, 4, 3, 2, 1]);
    assert_eq!(page.total_pages, 1);
  }

  #[test]
  fn search_matches_name_or_brand_case_insensitively() {
    let products = catalog();
    let mut filters = ProductFilters::default();
    filters.set_search("acme");
    assert_eq!(ids(&filter_products(&products, &filters)), vec![3, 1]);
    filters.set_search("SANDAL");
    assert_eq!(ids(&filter_products(&products, &filters)), vec![4]);
  }

  #[test]
  fn brand_price_and_stock_filters_combine() {
    let products = catalog();
    let mut filters = ProductFilters::default();
    filters.toggle_brand("nimbus");
    filters.toggle_brand("velo");
    filters.set_price_range(Some(50.0), Some(100.0));
    filters.set_in_stock_only(true);
    filters.set_sort(SortOrder::PriceAsc);
    assert_eq!(ids(&filter_products(&products, &filters)), vec![5]);

    filters.toggle_brand("velo");
    assert!(filter_products(&products, &filters).items.is_empty());
  }

  #[test]
  fn filter_change_resets_page() {
    let mut filters = ProductFilters::default();
    filters.set_page(3);
    filters.set_sort(SortOrder::NameAsc);
    assert_eq!(filters.page, 1);
  }

  #[test]
  fn page_is_clamped_to_last_page() {
    let products = catalog();
    let mut filters = ProductFilters::default();
    filters.set_page_size(2);
    filters.set_sort(SortOrder::PriceDesc);
    filters.set_page(9);
    let page = filter_products(&products, &filters);
    assert_eq!(page.page, 3);
    assert_eq!(page.total_pages, 3);
    assert_eq!(ids(&page), vec![4]);
  }

  #[test]
  fn empty_result_reports_first_page() {
    let products = catalog();
    let mut filters = ProductFilters::default();
    filters.set_search("nothing matches this");
    let page = filter_products(&products, &filters);
    assert_eq!((page.page, page.total_pages, page.total_items), (1, 0, 0));
  }
}
