// tests/provider_tests.rs
mod common;

use common::*;
use serial_test::serial;
use std::sync::Arc;
use storefront_cart::remote::{AddCartItemRequest, UpdateCartItemRequest};
use storefront_cart::{CartError, CartProvider, CartStore, CartTotals, MemoryStore, Session};

fn guest_provider() -> (CartProvider, Arc<MemoryStore>) {
  let store = Arc::new(MemoryStore::new());
  (CartProvider::new(store.clone()), store)
}

#[tokio::test]
#[serial]
async fn guest_add_merges_and_persists() {
  setup_tracing();
  let (mut provider, store) = guest_provider();

  provider.add_item(item(1, 10.0, 2)).await.unwrap();
  provider.add_item(item(2, 15.0, 1)).await.unwrap();
  provider.add_item(item(1, 10.0, 3)).await.unwrap();

  assert_eq!(provider.items().len(), 2);
  assert_eq!(provider.items()[0].quantity, 5);
  assert_eq!(provider.totals(), CartTotals { price: 65.0, count: 6 });
  assert_eq!(store.snapshot(), Some(provider.items().to_vec()));
  assert_eq!(store.save_count(), 3);
}

#[tokio::test]
#[serial]
async fn guest_add_rejects_non_positive_quantity() {
  setup_tracing();
  let (mut provider, store) = guest_provider();

  let err = provider.add_item(item(1, 10.0, 0)).await.unwrap_err();
  assert!(matches!(err, CartError::InvalidQuantity { variant_id: 1, quantity: 0 }));

  let err = provider.add_item(item(1, 10.0, -2)).await.unwrap_err();
  assert!(matches!(err, CartError::InvalidQuantity { quantity: -2, .. }));

  assert!(provider.is_empty());
  assert_eq!(store.save_count(), 0);
}

#[tokio::test]
#[serial]
async fn guest_hydrate_picks_up_saved_cart() {
  setup_tracing();
  let store = Arc::new(MemoryStore::with_items(two_line_cart()));
  let mut provider = CartProvider::new(store);

  assert!(provider.is_empty());
  provider.hydrate().await.unwrap();
  assert_eq!(provider.items(), &two_line_cart()[..]);
  assert_eq!(provider.totals(), CartTotals { price: 35.0, count: 3 });
}

#[tokio::test]
#[serial]
async fn guest_update_quantity_sets_and_removes() {
  setup_tracing();
  let store = Arc::new(MemoryStore::with_items(two_line_cart()));
  let mut provider = CartProvider::new(store.clone());
  provider.hydrate().await.unwrap();

  provider.update_quantity(2, 4).await.unwrap();
  assert_eq!(provider.items()[1].quantity, 4);

  provider.update_quantity(1, 0).await.unwrap();
  assert_eq!(provider.items().len(), 1);
  assert_eq!(provider.items()[0].variant_id, 2);
  assert_eq!(store.load().unwrap(), provider.items().to_vec());
}

#[tokio::test]
#[serial]
async fn unknown_variant_is_a_no_op() {
  setup_tracing();
  let store = Arc::new(MemoryStore::with_items(two_line_cart()));
  let mut provider = CartProvider::new(store.clone());
  provider.hydrate().await.unwrap();

  provider.remove_item(99).await.unwrap();
  provider.update_quantity(99, 3).await.unwrap();

  assert_eq!(provider.items(), &two_line_cart()[..]);
  assert_eq!(store.save_count(), 0);
}

#[tokio::test]
#[serial]
async fn guest_remove_and_clear() {
  setup_tracing();
  let store = Arc::new(MemoryStore::with_items(two_line_cart()));
  let mut provider = CartProvider::new(store.clone());
  provider.hydrate().await.unwrap();

  provider.remove_item(1).await.unwrap();
  assert_eq!(provider.items().len(), 1);
  assert_eq!(store.load().unwrap().len(), 1);

  provider.clear().await.unwrap();
  assert!(provider.is_empty());
  assert_eq!(provider.totals(), CartTotals::default());
  assert_eq!(store.snapshot(), None);
}

#[tokio::test]
#[serial]
async fn login_pushes_guest_lines_then_mirrors_remote() {
  setup_tracing();
  let api = Arc::new(FakeCartApi::with_lines(vec![item(2, 15.0, 2)]));
  api.know(item(1, 10.0, 1));
  let (mut provider, store) = guest_provider();
  provider.add_item(item(1, 10.0, 2)).await.unwrap();
  provider.add_item(item(2, 15.0, 1)).await.unwrap();

  provider.login(api.clone()).await.unwrap();

  assert!(provider.is_authenticated());
  assert_eq!(
    api.calls(),
    vec![
      ApiCall::Add(AddCartItemRequest { variant_id: 1, quantity: 2 }),
      ApiCall::Add(AddCartItemRequest { variant_id: 2, quantity: 1 }),
      ApiCall::Fetch,
    ]
  );
  let quantities: Vec<(i64, i64)> = provider.items().iter().map(|i| (i.variant_id, i.quantity)).collect();
  assert_eq!(quantities, vec![(2, 3), (1, 2)]);
  assert_eq!(store.snapshot(), None);
}

#[tokio::test]
#[serial]
async fn login_with_empty_guest_cart_only_fetches() {
  setup_tracing();
  let api = Arc::new(FakeCartApi::with_lines(two_line_cart()));
  let (mut provider, _store) = guest_provider();

  provider.login(api.clone()).await.unwrap();

  assert_eq!(api.calls(), vec![ApiCall::Fetch]);
  assert_eq!(provider.items(), &two_line_cart()[..]);
}

#[tokio::test]
#[serial]
async fn failed_login_keeps_guest_state() {
  setup_tracing();
  let api = Arc::new(FakeCartApi::new());
  api.fail_with(503);
  let (mut provider, store) = guest_provider();
  provider.add_item(item(1, 10.0, 1)).await.unwrap();

  let err = provider.login(api.clone()).await.unwrap_err();

  assert!(err.is_remote());
  assert!(!provider.is_authenticated());
  assert_eq!(provider.items().len(), 1);
  assert_eq!(store.load().unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn authenticated_operations_go_through_remote_only() {
  setup_tracing();
  let api = Arc::new(FakeCartApi::with_lines(two_line_cart()));
  api.know(item(3, 20.0, 1));
  let store = Arc::new(MemoryStore::new());
  let mut provider = CartProvider::with_session(store.clone(), Session::Authenticated(api.clone()));
  provider.hydrate().await.unwrap();

  provider.add_item(item(3, 20.0, 1)).await.unwrap();
  provider.add_item(item(1, 10.0, 3)).await.unwrap();
  assert_eq!(provider.totals(), CartTotals { price: 85.0, count: 7 });

  provider.update_quantity(2, 2).await.unwrap();
  provider.update_quantity(3, 0).await.unwrap();
  provider.remove_item(1).await.unwrap();

  assert_eq!(
    api.calls(),
    vec![
      ApiCall::Fetch,
      ApiCall::Add(AddCartItemRequest { variant_id: 3, quantity: 1 }),
      ApiCall::Add(AddCartItemRequest { variant_id: 1, quantity: 3 }),
      ApiCall::Update(UpdateCartItemRequest { variant_id: 2, quantity: 2 }),
      ApiCall::Remove(3),
      ApiCall::Remove(1),
    ]
  );
  assert_eq!(provider.items(), &api.lines()[..]);
  assert_eq!(provider.totals(), CartTotals { price: 30.0, count: 2 });
  assert_eq!(store.save_count(), 0);
}

#[tokio::test]
#[serial]
async fn authenticated_remote_failure_leaves_lines_unchanged() {
  setup_tracing();
  let api = Arc::new(FakeCartApi::with_lines(two_line_cart()));
  let mut provider = CartProvider::with_session(Arc::new(MemoryStore::new()), Session::Authenticated(api.clone()));
  provider.hydrate().await.unwrap();

  api.fail_with(500);
  let err = provider.add_item(item(1, 10.0, 1)).await.unwrap_err();

  assert!(matches!(err, CartError::Remote { status: 500, .. }));
  assert_eq!(provider.items(), &two_line_cart()[..]);
}

#[tokio::test]
#[serial]
async fn authenticated_clear_empties_remote_cart() {
  setup_tracing();
  let api = Arc::new(FakeCartApi::with_lines(two_line_cart()));
  let mut provider = CartProvider::with_session(Arc::new(MemoryStore::new()), Session::Authenticated(api.clone()));
  provider.hydrate().await.unwrap();

  provider.clear().await.unwrap();

  assert!(provider.is_empty());
  assert!(api.lines().is_empty());
  assert_eq!(api.calls().last(), Some(&ApiCall::Clear));
}

#[tokio::test]
#[serial]
async fn logout_resets_to_empty_guest_cart() {
  setup_tracing();
  let api = Arc::new(FakeCartApi::with_lines(two_line_cart()));
  let store = Arc::new(MemoryStore::with_items(vec![item(5, 1.0, 1)]));
  let mut provider = CartProvider::with_session(store.clone(), Session::Authenticated(api));
  provider.hydrate().await.unwrap();

  provider.logout().unwrap();

  assert!(!provider.is_authenticated());
  assert!(provider.is_empty());
  assert_eq!(store.snapshot(), None);
}

#[tokio::test]
#[serial]
async fn retried_login_after_partial_push_does_not_double_count() {
  setup_tracing();
  let api = Arc::new(FakeCartApi::new());
  for line in two_line_cart() {
    api.know(line);
  }
  api.fail_adds_after(1);
  let (mut provider, store) = guest_provider();
  for line in two_line_cart() {
    provider.add_item(line).await.unwrap();
  }

  let err = provider.login(api.clone()).await.unwrap_err();

  assert!(err.is_remote());
  assert!(!provider.is_authenticated());
  assert_eq!(api.lines(), vec![item(1, 10.0, 2)]);
  assert_eq!(provider.items().to_vec(), vec![item(2, 15.0, 1)]);
  assert_eq!(store.load().unwrap(), vec![item(2, 15.0, 1)]);

  api.recover();
  provider.login(api.clone()).await.unwrap();

  assert!(provider.is_authenticated());
  assert_eq!(provider.items().to_vec(), two_line_cart());
  assert_eq!(provider.totals(), CartTotals { price: 35.0, count: 3 });
}

#[tokio::test]
#[serial]
async fn logout_keeps_session_when_store_cannot_be_cleared() {
  setup_tracing();
  let api = Arc::new(FakeCartApi::with_lines(two_line_cart()));
  let mut provider = CartProvider::with_session(Arc::new(BrokenStore), Session::Authenticated(api));
  provider.hydrate().await.unwrap();

  let err = provider.logout().unwrap_err();

  assert!(matches!(err, CartError::Io(_)));
  assert!(provider.is_authenticated());
  assert_eq!(provider.items().len(), 2);
}
