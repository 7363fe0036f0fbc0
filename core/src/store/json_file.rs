// storefront-cart/src/store/json_file.rs

use super::{CartStore, PersistedCart, DEFAULT_CART_KEY, PERSISTED_VERSION};
use crate::error::CartResult;
use crate::model::CartItem;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persists the cart as JSON in `<dir>/<key>.json`.
///
/// Saves write a `.tmp` sibling and rename it over the target, so a crash
/// mid-write leaves the previous cart readable.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  path: PathBuf,
}

impl JsonFileStore {
  pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
    Self {
      path: dir.as_ref().join(format!("{}.json", key)),
    }
  }

  pub fn with_default_key(dir: impl AsRef<Path>) -> Self {
    Self::new(dir, DEFAULT_CART_KEY)
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn tmp_path(&self) -> PathBuf {
    self.path.with_extension("json.tmp")
  }
}

impl CartStore for JsonFileStore {
  fn load(&self) -> CartResult<Vec<CartItem>> {
    let raw = match fs::read_to_string(&self.path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!(path = %self.path.display(), "No persisted cart, starting empty.");
        return Ok(Vec::new());
      }
      Err(e) => return Err(e.into()),
    };

    let persisted: PersistedCart = serde_json::from_str(&raw)?;
    if persisted.version != PERSISTED_VERSION {
      warn!(
        path = %self.path.display(),
        found = persisted.version,
        expected = PERSISTED_VERSION,
        "Persisted cart version differs, reading items as-is."
      );
    }
    debug!(path = %self.path.display(), lines = persisted.state.items.len(), "Loaded persisted cart.");
    Ok(persisted.state.items)
  }

  fn save(&self, items: &[CartItem]) -> CartResult<()> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_vec_pretty(&PersistedCart::new(items))?;
    let tmp = self.tmp_path();
    fs::write(&tmp, body)?;
    fs::rename(&tmp, &self.path)?;
    debug!(path = %self.path.display(), lines = items.len(), "Saved cart.");
    Ok(())
  }

  fn clear(&self) -> CartResult<()> {
    match fs::remove_file(&self.path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}
