// storefront-cart/src/remote/mod.rs

//! The server-side cart of an authenticated shopper.
//!
//! Each endpoint of the `/cart` resource family has its own request and
//! response type in [`types`]; [`CartApi`] is the seam the provider talks
//! to, and [`HttpCartApi`] is its HTTP implementation.

pub mod http;
pub mod types;

pub use http::{HttpCartApi, HttpCartApiConfig};
pub use types::{AddCartItemRequest, CartResponse, UpdateCartItemRequest};

use crate::error::CartResult;
use crate::model::VariantId;
use async_trait::async_trait;

#[async_trait]
pub trait CartApi: Send + Sync {
  /// `GET /cart`
  async fn fetch_cart(&self) -> CartResult<CartResponse>;

  /// `POST /cart`. The server merges quantities for a variant it already holds.
  async fn add_item(&self, request: &AddCartItemRequest) -> CartResult<CartResponse>;

  /// `POST /cart/update`
  async fn update_quantity(&self, request: &UpdateCartItemRequest) -> CartResult<CartResponse>;

  /// `DELETE /cart/{variantId}`
  async fn remove_item(&self, variant_id: VariantId) -> CartResult<CartResponse>;

  /// `DELETE /cart`
  async fn clear_cart(&self) -> CartResult<()>;
}
