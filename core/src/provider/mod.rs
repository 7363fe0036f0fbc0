// storefront-cart/src/provider/mod.rs

//! The stateful owner of a shopper's cart.
//!
//! [`CartProvider`] holds the authoritative line sequence for the current
//! session. Guests mutate it locally through the reconciliation helpers and
//! persist it to the injected [`CartStore`]; authenticated shoppers mutate
//! the server-side cart and mirror whatever the server answers. Totals are
//! recomputed from the lines on every call.
//!
//! Operations take `&mut self`, so two mutations can never interleave on
//! one provider.

pub mod contexts;
pub mod flows;
pub mod session;

pub use contexts::CartEnv;
pub use flows::CartFlows;
pub use session::Session;

use crate::error::{CartError, CartResult};
use crate::flow::{Flow, FlowContext, FlowError, FlowOutcome};
use crate::model::{CartItem, CartTotals, VariantId};
use crate::reconcile::calculate_totals;
use crate::remote::CartApi;
use crate::store::CartStore;
use contexts::{AddItemCtx, ClearCartCtx, HydrateCtx, LoginSyncCtx, RemoveItemCtx, SetQuantityCtx};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct CartProvider {
  items: Vec<CartItem>,
  store: Arc<dyn CartStore>,
  session: Session,
  flows: Arc<CartFlows>,
}

impl CartProvider {
  /// A guest provider with an empty cart. Call [`CartProvider::hydrate`] to
  /// pick up a previously saved cart.
  pub fn new(store: Arc<dyn CartStore>) -> Self {
    Self::with_session(store, Session::Guest)
  }

  pub fn with_session(store: Arc<dyn CartStore>, session: Session) -> Self {
    Self {
      items: Vec::new(),
      store,
      session,
      flows: Arc::new(CartFlows::new()),
    }
  }

  pub fn items(&self) -> &[CartItem] {
    &self.items
  }

  pub fn totals(&self) -> CartTotals {
    calculate_totals(&self.items)
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn session(&self) -> &Session {
    &self.session
  }

  pub fn is_authenticated(&self) -> bool {
    self.session.is_authenticated()
  }

  fn env(&self) -> CartEnv {
    CartEnv {
      store: Arc::clone(&self.store),
      api: self.session.api(),
    }
  }

  /// Replaces the lines with the saved guest cart or the server cart,
  /// depending on the session.
  #[instrument(name = "CartProvider::hydrate", skip(self), fields(session = ?self.session), err(Display))]
  pub async fn hydrate(&mut self) -> CartResult<()> {
    let data = HydrateCtx {
      env: self.env(),
      items: Vec::new(),
    };
    let (_, data) = run_flow(&self.flows.hydrate, data).await?;
    self.items = data.items;
    info!(lines = self.items.len(), "Cart hydrated.");
    Ok(())
  }

  /// Adds `item`, merging its quantity into an existing line for the same
  /// variant. Rejects quantities below 1 with [`CartError::InvalidQuantity`].
  #[instrument(
    name = "CartProvider::add_item",
    skip(self, item),
    fields(variant_id = item.variant_id, quantity = item.quantity),
    err(Display)
  )]
  pub async fn add_item(&mut self, item: CartItem) -> CartResult<()> {
    let data = AddItemCtx {
      env: self.env(),
      items: self.items.clone(),
      incoming: item,
    };
    let (_, data) = run_flow(&self.flows.add_item, data).await?;
    self.items = data.items;
    Ok(())
  }

  /// Removes the line for `variant_id`. Unknown variants are a no-op.
  #[instrument(name = "CartProvider::remove_item", skip(self), err(Display))]
  pub async fn remove_item(&mut self, variant_id: VariantId) -> CartResult<()> {
    let data = RemoveItemCtx {
      env: self.env(),
      items: self.items.clone(),
      variant_id,
    };
    if let (FlowOutcome::Completed, data) = run_flow(&self.flows.remove_item, data).await? {
      self.items = data.items;
    }
    Ok(())
  }

  /// Sets a line's quantity outright. Zero or less removes the line.
  /// Unknown variants are a no-op.
  #[instrument(name = "CartProvider::update_quantity", skip(self), err(Display))]
  pub async fn update_quantity(&mut self, variant_id: VariantId, quantity: i64) -> CartResult<()> {
    let data = SetQuantityCtx {
      env: self.env(),
      items: self.items.clone(),
      variant_id,
      quantity,
    };
    if let (FlowOutcome::Completed, data) = run_flow(&self.flows.set_quantity, data).await? {
      self.items = data.items;
    }
    Ok(())
  }

  /// Empties the cart, e.g. once checkout has completed.
  #[instrument(name = "CartProvider::clear", skip(self), err(Display))]
  pub async fn clear(&mut self) -> CartResult<()> {
    let data = ClearCartCtx {
      env: self.env(),
      items: Vec::new(),
    };
    run_flow(&self.flows.clear, data).await?;
    self.items.clear();
    info!("Cart cleared.");
    Ok(())
  }

  /// Switches to an authenticated session backed by `api`.
  ///
  /// Every guest line is pushed to the server cart first, then the lines
  /// are replaced by the server's cart and the guest store is cleared. On
  /// failure the provider stays a guest. Lines the server already accepted
  /// are dropped from the guest cart so a retry does not add them twice.
  #[instrument(name = "CartProvider::login", skip(self, api), err(Display))]
  pub async fn login(&mut self, api: Arc<dyn CartApi>) -> CartResult<()> {
    let data = LoginSyncCtx {
      env: CartEnv {
        store: Arc::clone(&self.store),
        api: Some(Arc::clone(&api)),
      },
      guest_items: self.items.clone(),
      items: Vec::new(),
      pushed_lines: 0,
    };
    let (outcome, data) = run_flow_settled(&self.flows.login_sync, data).await;
    let data = data?;
    if let Err(err) = outcome {
      self.keep_unpushed_guest_lines(data.guest_items, data.pushed_lines);
      return Err(err);
    }
    self.session = Session::Authenticated(api);
    self.items = data.items;
    info!(
      pushed_lines = data.pushed_lines,
      lines = self.items.len(),
      "Logged in, cart synchronised with remote."
    );
    Ok(())
  }

  fn keep_unpushed_guest_lines(&mut self, mut guest_items: Vec<CartItem>, pushed_lines: usize) {
    if pushed_lines == 0 {
      return;
    }
    guest_items.drain(..pushed_lines.min(guest_items.len()));
    if let Err(e) = self.store.save(&guest_items) {
      warn!(error = %e, "Failed to save guest cart after partial login sync.");
    }
    warn!(
      pushed_lines,
      remaining = guest_items.len(),
      "Login sync failed midway, pushed lines now live in the remote cart."
    );
    self.items = guest_items;
  }

  /// Back to a guest session with an empty cart. The guest store is cleared
  /// as well, so nothing from the authenticated cart lingers locally. If the
  /// store cannot be cleared the session is left as it was.
  pub fn logout(&mut self) -> CartResult<()> {
    self.store.clear()?;
    self.session = Session::Guest;
    self.items.clear();
    info!("Logged out, guest cart reset.");
    Ok(())
  }
}

/// Runs `flow` over `data` and hands the data back together with how the
/// run ended.
async fn run_flow<T>(flow: &Flow<T, CartError>, data: T) -> CartResult<(FlowOutcome, T)>
where
  T: Send + Sync + 'static,
{
  let (outcome, data) = run_flow_settled(flow, data).await;
  let outcome = outcome?;
  Ok((outcome, data?))
}

/// Like [`run_flow`], but the data comes back even when a step failed.
async fn run_flow_settled<T>(flow: &Flow<T, CartError>, data: T) -> (CartResult<FlowOutcome>, CartResult<T>)
where
  T: Send + Sync + 'static,
{
  let ctx = FlowContext::new(data);
  let outcome = flow.run(ctx.clone()).await;
  let data = ctx.try_into_inner().map_err(|_| {
    CartError::from(FlowError::Internal(format!(
      "flow '{}' context still shared after run",
      flow.name()
    )))
  });
  (outcome, data)
}
