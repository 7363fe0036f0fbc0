// storefront-cart/src/provider/flows.rs

//! The flows behind each provider operation.
//!
//! Guest and authenticated paths live side by side in one flow: the
//! `apply_remote` step is skipped for guests, `apply_local`/`persist_local`
//! are skipped once the server owns the cart.

use super::contexts::{
  skip_for_guest, skip_when_authenticated, AddItemCtx, ClearCartCtx, HydrateCtx, LoginSyncCtx, RemoveItemCtx,
  SetQuantityCtx,
};
use crate::error::{CartError, CartResult};
use crate::flow::{Flow, FlowContext, FlowControl, SkipCondition};
use crate::model::VariantId;
use crate::reconcile::{process_new_item, remove_item, set_item_quantity};
use crate::remote::{AddCartItemRequest, UpdateCartItemRequest};
use std::future::{ready, Ready};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// One pre-built flow per provider operation.
pub struct CartFlows {
  pub hydrate: Flow<HydrateCtx, CartError>,
  pub add_item: Flow<AddItemCtx, CartError>,
  pub remove_item: Flow<RemoveItemCtx, CartError>,
  pub set_quantity: Flow<SetQuantityCtx, CartError>,
  pub clear: Flow<ClearCartCtx, CartError>,
  pub login_sync: Flow<LoginSyncCtx, CartError>,
}

impl CartFlows {
  pub fn new() -> Self {
    Self {
      hydrate: hydrate_flow(),
      add_item: add_item_flow(),
      remove_item: remove_item_flow(),
      set_quantity: set_quantity_flow(),
      clear: clear_flow(),
      login_sync: login_sync_flow(),
    }
  }
}

impl Default for CartFlows {
  fn default() -> Self {
    Self::new()
  }
}

// --- hydrate ---

pub fn hydrate_flow() -> Flow<HydrateCtx, CartError> {
  let mut flow = Flow::<HydrateCtx, CartError>::new(
    "hydrate",
    &[
      ("load_remote", false, skip_for_guest()),
      ("load_local", false, skip_when_authenticated()),
    ],
  );
  flow.on_root("load_remote", load_remote);
  flow.on_root("load_local", load_local);
  flow
}

async fn load_remote(ctx: FlowContext<HydrateCtx>) -> CartResult<FlowControl> {
  let api = { ctx.read().env.remote()? };
  let cart = api.fetch_cart().await?;
  debug!(lines = cart.items.len(), "Hydrated cart from remote.");
  ctx.write().items = cart.items;
  Ok(FlowControl::Continue)
}

async fn load_local(ctx: FlowContext<HydrateCtx>) -> CartResult<FlowControl> {
  let mut guard = ctx.write();
  guard.items = guard.env.store.load()?;
  debug!(lines = guard.items.len(), "Hydrated cart from local store.");
  Ok(FlowControl::Continue)
}

// --- add item ---

pub fn add_item_flow() -> Flow<AddItemCtx, CartError> {
  let mut flow = Flow::<AddItemCtx, CartError>::new(
    "add_item",
    &[
      ("validate_quantity", false, None),
      ("apply_remote", false, skip_for_guest()),
      ("apply_local", false, skip_when_authenticated()),
      ("persist_local", false, skip_when_authenticated()),
    ],
  );
  flow.on_root("validate_quantity", validate_quantity);
  flow.on_root("apply_remote", add_remote);
  flow.on_root("apply_local", add_local);
  flow.on_root("persist_local", |ctx: FlowContext<AddItemCtx>| {
    Box::pin(async move {
      let guard = ctx.read();
      guard.env.store.save(&guard.items)?;
      Ok::<_, CartError>(FlowControl::Continue)
    })
  });
  flow
}

async fn validate_quantity(ctx: FlowContext<AddItemCtx>) -> CartResult<FlowControl> {
  let (variant_id, quantity) = {
    let guard = ctx.read();
    (guard.incoming.variant_id, guard.incoming.quantity)
  };
  if quantity <= 0 {
    warn!(variant_id, quantity, "Rejected add to cart: quantity must be positive.");
    return Err(CartError::InvalidQuantity { variant_id, quantity });
  }
  Ok(FlowControl::Continue)
}

#[instrument(name = "cart_step::add_remote", skip(ctx), err(Display))]
async fn add_remote(ctx: FlowContext<AddItemCtx>) -> CartResult<FlowControl> {
  let (api, request) = {
    let guard = ctx.read();
    (guard.env.remote()?, AddCartItemRequest::from(&guard.incoming))
  };
  let cart = api.add_item(&request).await?;
  ctx.write().items = cart.items;
  Ok(FlowControl::Continue)
}

async fn add_local(ctx: FlowContext<AddItemCtx>) -> CartResult<FlowControl> {
  let mut guard = ctx.write();
  let next = process_new_item(&guard.items, &guard.incoming);
  guard.items = next;
  Ok(FlowControl::Continue)
}

// --- remove item ---

/// Stops the flow when the variant has no line, which makes the operation
/// a no-op for the caller.
fn locate_line<T>(
  variant_of: fn(&T) -> (VariantId, bool),
) -> impl Fn(FlowContext<T>) -> Ready<CartResult<FlowControl>> + Send + Sync + 'static
where
  T: Send + Sync + 'static,
{
  move |ctx: FlowContext<T>| {
    let (variant_id, present) = variant_of(&ctx.read());
    if present {
      ready(Ok(FlowControl::Continue))
    } else {
      debug!(variant_id, "No cart line for variant, nothing to do.");
      ready(Ok(FlowControl::Stop))
    }
  }
}

pub fn remove_item_flow() -> Flow<RemoveItemCtx, CartError> {
  let mut flow = Flow::<RemoveItemCtx, CartError>::new(
    "remove_item",
    &[
      ("locate_line", false, None),
      ("apply_remote", false, skip_for_guest()),
      ("apply_local", false, skip_when_authenticated()),
      ("persist_local", false, skip_when_authenticated()),
    ],
  );
  flow.on_root(
    "locate_line",
    locate_line(|data: &RemoveItemCtx| {
      (data.variant_id, data.items.iter().any(|i| i.variant_id == data.variant_id))
    }),
  );
  flow.on_root("apply_remote", |ctx: FlowContext<RemoveItemCtx>| {
    Box::pin(async move {
      let (api, variant_id) = {
        let guard = ctx.read();
        (guard.env.remote()?, guard.variant_id)
      };
      let cart = api.remove_item(variant_id).await?;
      ctx.write().items = cart.items;
      Ok::<_, CartError>(FlowControl::Continue)
    })
  });
  flow.on_root("apply_local", |ctx: FlowContext<RemoveItemCtx>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      let next = remove_item(&guard.items, guard.variant_id);
      guard.items = next;
      Ok::<_, CartError>(FlowControl::Continue)
    })
  });
  flow.on_root("persist_local", |ctx: FlowContext<RemoveItemCtx>| {
    Box::pin(async move {
      let guard = ctx.read();
      guard.env.store.save(&guard.items)?;
      Ok::<_, CartError>(FlowControl::Continue)
    })
  });
  flow
}

// --- set quantity ---

pub fn set_quantity_flow() -> Flow<SetQuantityCtx, CartError> {
  let mut flow = Flow::<SetQuantityCtx, CartError>::new(
    "set_quantity",
    &[
      ("locate_line", false, None),
      ("apply_remote", false, skip_for_guest()),
      ("apply_local", false, skip_when_authenticated()),
      ("persist_local", false, skip_when_authenticated()),
    ],
  );
  flow.on_root(
    "locate_line",
    locate_line(|data: &SetQuantityCtx| {
      (data.variant_id, data.items.iter().any(|i| i.variant_id == data.variant_id))
    }),
  );
  flow.on_root("apply_remote", set_quantity_remote);
  flow.on_root("apply_local", |ctx: FlowContext<SetQuantityCtx>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      let next = set_item_quantity(&guard.items, guard.variant_id, guard.quantity);
      guard.items = next;
      Ok::<_, CartError>(FlowControl::Continue)
    })
  });
  flow.on_root("persist_local", |ctx: FlowContext<SetQuantityCtx>| {
    Box::pin(async move {
      let guard = ctx.read();
      guard.env.store.save(&guard.items)?;
      Ok::<_, CartError>(FlowControl::Continue)
    })
  });
  flow
}

/// A quantity of zero or less removes the line on the server too.
#[instrument(name = "cart_step::set_quantity_remote", skip(ctx), err(Display))]
async fn set_quantity_remote(ctx: FlowContext<SetQuantityCtx>) -> CartResult<FlowControl> {
  let (api, variant_id, quantity) = {
    let guard = ctx.read();
    (guard.env.remote()?, guard.variant_id, guard.quantity)
  };
  let cart = if quantity <= 0 {
    api.remove_item(variant_id).await?
  } else {
    api
      .update_quantity(&UpdateCartItemRequest { variant_id, quantity })
      .await?
  };
  ctx.write().items = cart.items;
  Ok(FlowControl::Continue)
}

// --- clear ---

pub fn clear_flow() -> Flow<ClearCartCtx, CartError> {
  let mut flow = Flow::<ClearCartCtx, CartError>::new(
    "clear",
    &[
      ("apply_remote", false, skip_for_guest()),
      ("apply_local", false, None),
      ("persist_local", false, skip_when_authenticated()),
    ],
  );
  flow.on_root("apply_remote", |ctx: FlowContext<ClearCartCtx>| {
    Box::pin(async move {
      let api = { ctx.read().env.remote()? };
      api.clear_cart().await?;
      Ok::<_, CartError>(FlowControl::Continue)
    })
  });
  flow.on_root("apply_local", |ctx: FlowContext<ClearCartCtx>| {
    Box::pin(async move {
      ctx.write().items.clear();
      Ok::<_, CartError>(FlowControl::Continue)
    })
  });
  flow.on_root("persist_local", |ctx: FlowContext<ClearCartCtx>| {
    Box::pin(async move {
      ctx.read().env.store.clear()?;
      Ok::<_, CartError>(FlowControl::Continue)
    })
  });
  flow
}

// --- login sync ---

pub fn login_sync_flow() -> Flow<LoginSyncCtx, CartError> {
  let no_guest_lines: SkipCondition<LoginSyncCtx> =
    Arc::new(|ctx: &FlowContext<LoginSyncCtx>| ctx.read().guest_items.is_empty());

  let mut flow = Flow::<LoginSyncCtx, CartError>::new(
    "login_sync",
    &[
      ("push_guest_lines", false, Some(no_guest_lines)),
      ("fetch_remote_cart", false, None),
      ("clear_guest_store", false, None),
    ],
  );
  flow.on_root("push_guest_lines", push_guest_lines);
  flow.on_root("fetch_remote_cart", |ctx: FlowContext<LoginSyncCtx>| {
    Box::pin(async move {
      let api = { ctx.read().env.remote()? };
      let cart = api.fetch_cart().await?;
      ctx.write().items = cart.items;
      Ok::<_, CartError>(FlowControl::Continue)
    })
  });
  flow.on_root("clear_guest_store", |ctx: FlowContext<LoginSyncCtx>| {
    Box::pin(async move {
      ctx.read().env.store.clear()?;
      Ok::<_, CartError>(FlowControl::Continue)
    })
  });
  flow
}

/// Sends every guest line to the server, one `POST /cart` each, in cart
/// order. The server merges quantities for variants it already holds.
#[instrument(name = "cart_step::push_guest_lines", skip(ctx), err(Display))]
async fn push_guest_lines(ctx: FlowContext<LoginSyncCtx>) -> CartResult<FlowControl> {
  let (api, requests) = {
    let guard = ctx.read();
    let requests: Vec<AddCartItemRequest> = guard.guest_items.iter().map(AddCartItemRequest::from).collect();
    (guard.env.remote()?, requests)
  };
  for request in &requests {
    api.add_item(request).await?;
    ctx.write().pushed_lines += 1;
  }
  info!(lines = requests.len(), "Pushed guest cart lines to remote cart.");
  Ok(FlowControl::Continue)
}
