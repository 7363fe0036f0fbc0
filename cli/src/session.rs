// storefront-cli/src/session.rs

//! The signed-in shopper's token, kept next to the cart file between runs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use storefront_cart::CartResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSession {
  pub token: String,
}

#[derive(Debug, Clone)]
pub struct SessionFile {
  path: PathBuf,
}

impl SessionFile {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn load(&self) -> CartResult<Option<SavedSession>> {
    match fs::read_to_string(&self.path) {
      Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  pub fn save(&self, session: &SavedSession) -> CartResult<()> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(&self.path, serde_json::to_vec(session)?)?;
    Ok(())
  }

  pub fn remove(&self) -> CartResult<()> {
    match fs::remove_file(&self.path) {
      Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
      _ => Ok(()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn save_load_remove() {
    let dir = tempfile::tempdir().unwrap();
    let file = SessionFile::new(dir.path().join("cart.session.json"));
    assert_eq!(file.load().unwrap(), None);

    let session = SavedSession {
      token: "abc".to_string(),
    };
    file.save(&session).unwrap();
    assert_eq!(file.load().unwrap(), Some(session));

    file.remove().unwrap();
    file.remove().unwrap();
    assert_eq!(file.load().unwrap(), None);
  }
}
