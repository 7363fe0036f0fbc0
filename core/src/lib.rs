// storefront-cart/src/lib.rs

//! Storefront cart: line reconciliation, persistence and remote sync.
//!
//! The crate is layered bottom-up:
//!  - [`reconcile`]: pure functions that merge an incoming add-to-cart
//!    request into a line sequence and compute totals.
//!  - [`store`]: the persisted guest cart behind an injected [`CartStore`].
//!  - [`remote`]: typed requests for the server-side `/cart` resource and an
//!    HTTP client for it.
//!  - [`flow`]: a small async step runner with named steps, skip conditions
//!    and shared context.
//!  - [`provider`]: the stateful [`CartProvider`] that owns the live lines
//!    and runs one flow per operation.
//!  - [`catalog`]: listing filters, sorting and pagination for product pages.

pub mod catalog;
pub mod error;
pub mod flow;
pub mod model;
pub mod provider;
pub mod reconcile;
pub mod remote;
pub mod store;

pub use crate::error::{CartError, CartResult};
pub use crate::model::{Brand, CartItem, CartTotals, VariantId};
pub use crate::provider::{CartProvider, Session};
pub use crate::reconcile::{add_new_item, calculate_totals, process_new_item, update_existing_item};
pub use crate::remote::{CartApi, HttpCartApi, HttpCartApiConfig};
pub use crate::store::{CartStore, JsonFileStore, MemoryStore};

/*
    Typical guest session:
    1. Build a store: `JsonFileStore::with_default_key(data_dir)`.
    2. `CartProvider::new(Arc::new(store))`, then `provider.hydrate().await?`.
    3. `provider.add_item(item).await?` merges or appends, then saves.
    4. On sign-in, `provider.login(Arc::new(HttpCartApi::new(config)?)).await?`
       pushes the guest lines to the server and mirrors the server cart.
*/
