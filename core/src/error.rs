// storefront-cart/src/error.rs
use crate::flow::FlowError;
use crate::model::VariantId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Invalid quantity {quantity} for variant {variant_id}: must be at least 1")]
  InvalidQuantity { variant_id: VariantId, quantity: i64 },

  #[error("No remote cart API configured for an authenticated session")]
  RemoteUnavailable,

  #[error("Cart storage I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Cart serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Cart API transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("Cart API responded {status}: {message}")]
  Remote { status: u16, message: String },

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Cart flow error: {source}")]
  Flow {
    #[from]
    source: FlowError,
  },
}

impl CartError {
  /// True for failures reported by the remote cart service itself.
  pub fn is_remote(&self) -> bool {
    matches!(self, CartError::Remote { .. } | CartError::Transport(_))
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
