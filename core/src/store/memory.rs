// storefront-cart/src/store/memory.rs

use super::CartStore;
use crate::error::CartResult;
use crate::model::CartItem;
use parking_lot::Mutex;

/// Keeps the last saved snapshot in memory. Useful for tests and for
/// sessions that should not outlive the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
  items: Mutex<Option<Vec<CartItem>>>,
  saves: Mutex<usize>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Starts out as if `items` had been saved earlier.
  pub fn with_items(items: Vec<CartItem>) -> Self {
    Self {
      items: Mutex::new(Some(items)),
      saves: Mutex::new(0),
    }
  }

  /// The saved snapshot, `None` after `clear` or before the first save.
  pub fn snapshot(&self) -> Option<Vec<CartItem>> {
    self.items.lock().clone()
  }

  pub fn save_count(&self) -> usize {
    *self.saves.lock()
  }
}

impl CartStore for MemoryStore {
  fn load(&self) -> CartResult<Vec<CartItem>> {
    Ok(self.items.lock().clone().unwrap_or_default())
  }

  fn save(&self, items: &[CartItem]) -> CartResult<()> {
    *self.items.lock() = Some(items.to_vec());
    *self.saves.lock() += 1;
    Ok(())
  }

  fn clear(&self) -> CartResult<()> {
    *self.items.lock() = None;
    Ok(())
  }
}
