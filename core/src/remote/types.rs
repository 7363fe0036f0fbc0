// storefront-cart/src/remote/types.rs

use crate::model::{CartItem, VariantId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
  pub variant_id: VariantId,
  pub quantity: i64,
}

impl From<&CartItem> for AddCartItemRequest {
  fn from(item: &CartItem) -> Self {
    Self {
      variant_id: item.variant_id,
      quantity: item.quantity,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
  pub variant_id: VariantId,
  pub quantity: i64,
}

/// Body returned by every cart endpoint that reports the resulting cart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartResponse {
  #[serde(default)]
  pub items: Vec<CartItem>,
}

/// Error body shapes the backend uses. Either key may carry the text.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
  pub error: Option<String>,
  pub message: Option<String>,
}

impl ErrorBody {
  pub(crate) fn into_message(self) -> Option<String> {
    self.error.or(self.message)
  }
}
