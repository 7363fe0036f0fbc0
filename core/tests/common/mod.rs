// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use storefront_cart::reconcile::{process_new_item, remove_item, set_item_quantity};
use storefront_cart::remote::{AddCartItemRequest, CartApi, CartResponse, UpdateCartItemRequest};
use storefront_cart::{CartError, CartItem, CartResult, CartStore, VariantId};
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub fn item(variant_id: VariantId, price: f64, quantity: i64) -> CartItem {
  CartItem::new(
    variant_id,
    price,
    quantity,
    format!("Variant {}", variant_id),
    format!("variant-{}", variant_id),
  )
  .with_image(format!("/img/{}.jpg", variant_id))
  .with_brand("Acme", "acme")
  .with_stock(10)
}

/// The two-line cart used by the merge/append scenarios.
pub fn two_line_cart() -> Vec<CartItem> {
  vec![item(1, 10.0, 2), item(2, 15.0, 1)]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
  Fetch,
  Add(AddCartItemRequest),
  Update(UpdateCartItemRequest),
  Remove(VariantId),
  Clear,
}

/// In-memory stand-in for the server cart. Merges quantities on add the way
/// the backend does, records every call, and can be told to fail.
#[derive(Default)]
pub struct FakeCartApi {
  lines: Mutex<Vec<CartItem>>,
  /// Prices and display data the "server" knows per variant.
  catalog: Mutex<HashMap<VariantId, CartItem>>,
  calls: Mutex<Vec<ApiCall>>,
  fail_with_status: Mutex<Option<u16>>,
  /// When set, `add_item` succeeds this many more times and then fails.
  adds_before_failure: Mutex<Option<usize>>,
}

impl FakeCartApi {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_lines(lines: Vec<CartItem>) -> Self {
    let api = Self::new();
    for line in &lines {
      api.know(line.clone());
    }
    *api.lines.lock() = lines;
    api
  }

  /// Registers a variant so `add_item` can build a full line for it.
  pub fn know(&self, variant: CartItem) {
    self.catalog.lock().insert(variant.variant_id, variant);
  }

  pub fn fail_with(&self, status: u16) {
    *self.fail_with_status.lock() = Some(status);
  }

  /// Lets the next `n` adds through, then fails every later one with 503.
  pub fn fail_adds_after(&self, n: usize) {
    *self.adds_before_failure.lock() = Some(n);
  }

  /// Back to a healthy server.
  pub fn recover(&self) {
    *self.fail_with_status.lock() = None;
    *self.adds_before_failure.lock() = None;
  }

  pub fn calls(&self) -> Vec<ApiCall> {
    self.calls.lock().clone()
  }

  pub fn lines(&self) -> Vec<CartItem> {
    self.lines.lock().clone()
  }

  fn record(&self, call: ApiCall) -> CartResult<()> {
    self.calls.lock().push(call);
    match *self.fail_with_status.lock() {
      Some(status) => Err(CartError::Remote {
        status,
        message: "simulated failure".to_string(),
      }),
      None => Ok(()),
    }
  }

  fn response(&self) -> CartResponse {
    CartResponse { items: self.lines() }
  }
}

#[async_trait]
impl CartApi for FakeCartApi {
  async fn fetch_cart(&self) -> CartResult<CartResponse> {
    self.record(ApiCall::Fetch)?;
    Ok(self.response())
  }

  async fn add_item(&self, request: &AddCartItemRequest) -> CartResult<CartResponse> {
    self.record(ApiCall::Add(request.clone()))?;
    if let Some(left) = self.adds_before_failure.lock().as_mut() {
      if *left == 0 {
        return Err(CartError::Remote {
          status: 503,
          message: "simulated failure".to_string(),
        });
      }
      *left -= 1;
    }
    let known = self.catalog.lock().get(&request.variant_id).cloned();
    let incoming = match known {
      Some(variant) => CartItem {
        quantity: request.quantity,
        ..variant
      },
      None => {
        return Err(CartError::Remote {
          status: 404,
          message: format!("variant {} not found", request.variant_id),
        })
      }
    };
    {
      let mut lines = self.lines.lock();
      let next = process_new_item(&lines, &incoming);
      *lines = next;
    }
    Ok(self.response())
  }

  async fn update_quantity(&self, request: &UpdateCartItemRequest) -> CartResult<CartResponse> {
    self.record(ApiCall::Update(request.clone()))?;
    {
      let mut lines = self.lines.lock();
      let next = set_item_quantity(&lines, request.variant_id, request.quantity);
      *lines = next;
    }
    Ok(self.response())
  }

  async fn remove_item(&self, variant_id: VariantId) -> CartResult<CartResponse> {
    self.record(ApiCall::Remove(variant_id))?;
    {
      let mut lines = self.lines.lock();
      let next = remove_item(&lines, variant_id);
      *lines = next;
    }
    Ok(self.response())
  }

  async fn clear_cart(&self) -> CartResult<()> {
    self.record(ApiCall::Clear)?;
    self.lines.lock().clear();
    Ok(())
  }
}

/// A store whose disk is gone: loads are empty, writes fail.
pub struct BrokenStore;

impl CartStore for BrokenStore {
  fn load(&self) -> CartResult<Vec<CartItem>> {
    Ok(Vec::new())
  }

  fn save(&self, _items: &[CartItem]) -> CartResult<()> {
    Err(CartError::Io(std::io::Error::other("disk unavailable")))
  }

  fn clear(&self) -> CartResult<()> {
    Err(CartError::Io(std::io::Error::other("disk unavailable")))
  }
}
