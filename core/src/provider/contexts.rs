// storefront-cart/src/provider/contexts.rs

//! Working data for each cart flow. Handlers see these through
//! `FlowContext<..>`.

use crate::error::{CartError, CartResult};
use crate::flow::{FlowContext, SkipCondition};
use crate::model::{CartItem, VariantId};
use crate::remote::CartApi;
use crate::store::CartStore;
use std::sync::Arc;

/// Handles shared by every flow: where guest lines persist, and the remote
/// cart when the session is authenticated.
#[derive(Clone)]
pub struct CartEnv {
  pub store: Arc<dyn CartStore>,
  pub api: Option<Arc<dyn CartApi>>,
}

impl CartEnv {
  pub fn is_authenticated(&self) -> bool {
    self.api.is_some()
  }

  pub fn remote(&self) -> CartResult<Arc<dyn CartApi>> {
    self.api.clone().ok_or(CartError::RemoteUnavailable)
  }
}

pub trait HasCartEnv: Send + Sync + 'static {
  fn env(&self) -> &CartEnv;
}

/// Skips a step for guest sessions.
pub fn skip_for_guest<T: HasCartEnv>() -> Option<SkipCondition<T>> {
  let cond: SkipCondition<T> = Arc::new(|ctx: &FlowContext<T>| !ctx.read().env().is_authenticated());
  Some(cond)
}

/// Skips a step for authenticated sessions.
pub fn skip_when_authenticated<T: HasCartEnv>() -> Option<SkipCondition<T>> {
  let cond: SkipCondition<T> = Arc::new(|ctx: &FlowContext<T>| ctx.read().env().is_authenticated());
  Some(cond)
}

macro_rules! impl_has_cart_env {
  ($($ty:ty),+ $(,)?) => {
    $(impl HasCartEnv for $ty {
      fn env(&self) -> &CartEnv {
        &self.env
      }
    })+
  };
}

pub struct HydrateCtx {
  pub env: CartEnv,
  pub items: Vec<CartItem>,
}

pub struct AddItemCtx {
  pub env: CartEnv,
  pub items: Vec<CartItem>,
  pub incoming: CartItem,
}

pub struct RemoveItemCtx {
  pub env: CartEnv,
  pub items: Vec<CartItem>,
  pub variant_id: VariantId,
}

pub struct SetQuantityCtx {
  pub env: CartEnv,
  pub items: Vec<CartItem>,
  pub variant_id: VariantId,
  pub quantity: i64,
}

pub struct ClearCartCtx {
  pub env: CartEnv,
  pub items: Vec<CartItem>,
}

pub struct LoginSyncCtx {
  /// Already carries the authenticated client.
  pub env: CartEnv,
  pub guest_items: Vec<CartItem>,
  pub items: Vec<CartItem>,
  pub pushed_lines: usize,
}

impl_has_cart_env!(HydrateCtx, AddItemCtx, RemoveItemCtx, SetQuantityCtx, ClearCartCtx, LoginSyncCtx);
