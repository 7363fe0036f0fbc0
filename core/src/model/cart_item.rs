// storefront-cart/src/model/cart_item.rs

use serde::{Deserialize, Serialize};

/// Identifies one purchasable SKU. Stable merge key for cart lines.
pub type VariantId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Brand {
  pub name: String,
  pub slug: String,
}

/// One distinct variant held in a cart.
///
/// `quantity` is signed: the reconciliation helpers pass zero and negative
/// incoming quantities through untouched, and the type has to be able to
/// carry that. `stock` is informational and never enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
  pub variant_id: VariantId,
  pub price: f64,
  pub quantity: i64,
  pub name: String,
  pub slug: String,
  #[serde(default)]
  pub image: String,
  #[serde(default)]
  pub brand: Brand,
  #[serde(default)]
  pub stock: i64,
}

impl CartItem {
  pub fn new(variant_id: VariantId, price: f64, quantity: i64, name: impl Into<String>, slug: impl Into<String>) -> Self {
    Self {
      variant_id,
      price,
      quantity,
      name: name.into(),
      slug: slug.into(),
      image: String::new(),
      brand: Brand::default(),
      stock: 0,
    }
  }

  pub fn with_image(mut self, image: impl Into<String>) -> Self {
    self.image = image.into();
    self
  }

  pub fn with_brand(mut self, name: impl Into<String>, slug: impl Into<String>) -> Self {
    self.brand = Brand {
      name: name.into(),
      slug: slug.into(),
    };
    self
  }

  pub fn with_stock(mut self, stock: i64) -> Self {
    self.stock = stock;
    self
  }

  /// `price × quantity` for this line.
  pub fn line_total(&self) -> f64 {
    self.price * self.quantity as f64
  }
}
