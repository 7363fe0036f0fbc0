// storefront-cart/examples/guest_cart.rs

use std::sync::Arc;
use storefront_cart::{CartItem, CartProvider, CartResult, JsonFileStore};
use tracing::info;

#[tokio::main]
async fn main() -> CartResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let dir = std::env::temp_dir().join("storefront-guest-cart-example");
  let store = Arc::new(JsonFileStore::with_default_key(&dir));
  let mut provider = CartProvider::new(store.clone());
  provider.hydrate().await?;
  provider.clear().await?;

  let tee = CartItem::new(1, 10.0, 2, "Logo Tee", "logo-tee").with_brand("Acme", "acme");
  let cap = CartItem::new(2, 15.0, 1, "Field Cap", "field-cap").with_brand("Acme", "acme");

  provider.add_item(tee.clone()).await?;
  provider.add_item(cap).await?;
  info!(totals = ?provider.totals(), "Two lines added.");

  provider.add_item(CartItem { quantity: 3, ..tee }).await?;
  info!(totals = ?provider.totals(), "Tee quantity merged.");

  provider.update_quantity(2, 0).await?;
  info!(totals = ?provider.totals(), path = %store.path().display(), "Cap removed, cart saved.");

  Ok(())
}
