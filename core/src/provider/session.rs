// storefront-cart/src/provider/session.rs

use crate::remote::CartApi;
use std::fmt;
use std::sync::Arc;

/// Who the cart belongs to right now.
///
/// A guest cart lives only in the local store. An authenticated cart lives
/// on the server, reached through a client already bound to the shopper's
/// credentials. The two never race over the same lines: switching is an
/// explicit `login`/`logout` on the provider.
#[derive(Clone, Default)]
pub enum Session {
  #[default]
  Guest,
  Authenticated(Arc<dyn CartApi>),
}

impl Session {
  pub fn is_authenticated(&self) -> bool {
    matches!(self, Session::Authenticated(_))
  }

  pub fn api(&self) -> Option<Arc<dyn CartApi>> {
    match self {
      Session::Guest => None,
      Session::Authenticated(api) => Some(Arc::clone(api)),
    }
  }
}

impl fmt::Debug for Session {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Session::Guest => f.write_str("Guest"),
      Session::Authenticated(_) => f.write_str("Authenticated"),
    }
  }
}
