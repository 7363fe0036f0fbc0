// storefront-cart/src/reconcile.rs

//! Pure cart line reconciliation.
//!
//! Every function borrows its input and returns a fresh sequence, so a
//! caller's cart is never touched in place. None of them validate
//! quantities: zero or negative incoming quantities are merged or appended
//! exactly as given, and callers that care (the provider does) check before
//! calling. When the input already holds several lines for one variant,
//! which breaks the uniqueness invariant, every such line is bumped.

use crate::model::{CartItem, CartTotals, VariantId};

/// Sums `price × quantity` and `quantity` over all lines. The count
/// saturates at the `i64` bounds.
pub fn calculate_totals(items: &[CartItem]) -> CartTotals {
  items.iter().fold(CartTotals::default(), |acc, item| CartTotals {
    price: acc.price + item.line_total(),
    count: acc.count.saturating_add(item.quantity),
  })
}

/// Adds `new_item.quantity` to the line with the same variant, saturating
/// at the `i64` bounds. Every other
/// field of that line keeps its existing value. Without a matching line the
/// result is an unchanged copy.
pub fn update_existing_item(items: &[CartItem], new_item: &CartItem) -> Vec<CartItem> {
  items
    .iter()
    .map(|item| {
      if item.variant_id == new_item.variant_id {
        CartItem {
          quantity: item.quantity.saturating_add(new_item.quantity),
          ..item.clone()
        }
      } else {
        item.clone()
      }
    })
    .collect()
}

/// Appends `new_item` after the existing lines.
pub fn add_new_item(items: &[CartItem], new_item: &CartItem) -> Vec<CartItem> {
  let mut next = Vec::with_capacity(items.len() + 1);
  next.extend_from_slice(items);
  next.push(new_item.clone());
  next
}

/// Merges into an existing line when the variant is already present,
/// otherwise appends. Existing lines never change position.
pub fn process_new_item(current_items: &[CartItem], new_item: &CartItem) -> Vec<CartItem> {
  let exists = current_items.iter().any(|item| item.variant_id == new_item.variant_id);
  if exists {
    update_existing_item(current_items, new_item)
  } else {
    add_new_item(current_items, new_item)
  }
}

/// Drops every line for `variant_id`.
pub fn remove_item(items: &[CartItem], variant_id: VariantId) -> Vec<CartItem> {
  items.iter().filter(|item| item.variant_id != variant_id).cloned().collect()
}

/// Sets the quantity of the matching line. A quantity of zero or less
/// removes the line, keeping every quantity in a cart at 1 or more.
pub fn set_item_quantity(items: &[CartItem], variant_id: VariantId, quantity: i64) -> Vec<CartItem> {
  if quantity <= 0 {
    return remove_item(items, variant_id);
  }
  items
    .iter()
    .map(|item| {
      if item.variant_id == variant_id {
        CartItem {
          quantity,
          ..item.clone()
        }
      } else {
        item.clone()
      }
    })
    .collect()
}
