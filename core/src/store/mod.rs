// storefront-cart/src/store/mod.rs

//! Persistence for the guest cart.
//!
//! The provider owns a store handle and calls `load`/`save`/`clear` at
//! explicit points; nothing is written behind its back.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::CartResult;
use crate::model::CartItem;
use serde::{Deserialize, Serialize};

/// Storage key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "cart-storage";

/// Current version of the persisted envelope.
pub const PERSISTED_VERSION: u32 = 1;

pub trait CartStore: Send + Sync {
  /// Returns the saved lines, or an empty cart when nothing was saved yet.
  fn load(&self) -> CartResult<Vec<CartItem>>;

  fn save(&self, items: &[CartItem]) -> CartResult<()>;

  /// Forgets the saved cart. Clearing an empty store is not an error.
  fn clear(&self) -> CartResult<()>;
}

/// On-disk envelope: `{"version": 1, "state": {"items": [...]}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedCart {
  pub version: u32,
  pub state: PersistedState,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedState {
  #[serde(default)]
  pub items: Vec<CartItem>,
}

impl PersistedCart {
  pub fn new(items: &[CartItem]) -> Self {
    Self {
      version: PERSISTED_VERSION,
      state: PersistedState { items: items.to_vec() },
    }
  }
}
