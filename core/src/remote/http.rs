// storefront-cart/src/remote/http.rs

use super::types::{AddCartItemRequest, CartResponse, ErrorBody, UpdateCartItemRequest};
use super::CartApi;
use crate::error::{CartError, CartResult};
use crate::model::VariantId;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone)]
pub struct HttpCartApiConfig {
  /// Backend root, e.g. `https://shop.example.com/api`. `/cart` is appended.
  pub base_url: String,
  pub timeout: Duration,
  /// Sent as `Authorization: Bearer <token>` when present.
  pub bearer_token: Option<String>,
}

impl Default for HttpCartApiConfig {
  fn default() -> Self {
    Self {
      base_url: String::new(),
      timeout: Duration::from_secs(30),
      bearer_token: None,
    }
  }
}

impl HttpCartApiConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      ..Self::default()
    }
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
    self.bearer_token = Some(token.into());
    self
  }
}

/// [`CartApi`] over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpCartApi {
  client: Client,
  config: HttpCartApiConfig,
}

impl HttpCartApi {
  pub fn new(config: HttpCartApiConfig) -> CartResult<Self> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/cart{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
    match &self.config.bearer_token {
      Some(token) => request.bearer_auth(token),
      None => request,
    }
  }

  async fn send(&self, request: RequestBuilder) -> CartResult<Response> {
    let response = self.authorize(request).send().await?;
    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }

    let text = match response.text().await {
      Ok(text) => text,
      Err(e) => {
        warn!(status = status.as_u16(), error = %e, "Failed to read Cart API error body.");
        String::new()
      }
    };
    let message = serde_json::from_str::<ErrorBody>(&text)
      .ok()
      .and_then(ErrorBody::into_message)
      .unwrap_or_else(|| {
        if text.is_empty() {
          status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
          text
        }
      });
    warn!(status = status.as_u16(), %message, "Cart API request failed.");
    Err(CartError::Remote {
      status: status.as_u16(),
      message,
    })
  }

  async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> CartResult<T> {
    let response = self.send(request).await?;
    Ok(response.json::<T>().await?)
  }
}

#[async_trait]
impl CartApi for HttpCartApi {
  #[instrument(name = "HttpCartApi::fetch_cart", skip(self), err(Display))]
  async fn fetch_cart(&self) -> CartResult<CartResponse> {
    let cart: CartResponse = self.send_json(self.client.get(self.url(""))).await?;
    debug!(lines = cart.items.len(), "Fetched remote cart.");
    Ok(cart)
  }

  #[instrument(
    name = "HttpCartApi::add_item",
    skip(self, request),
    fields(variant_id = request.variant_id, quantity = request.quantity),
    err(Display)
  )]
  async fn add_item(&self, request: &AddCartItemRequest) -> CartResult<CartResponse> {
    self.send_json(self.client.post(self.url("")).json(request)).await
  }

  #[instrument(
    name = "HttpCartApi::update_quantity",
    skip(self, request),
    fields(variant_id = request.variant_id, quantity = request.quantity),
    err(Display)
  )]
  async fn update_quantity(&self, request: &UpdateCartItemRequest) -> CartResult<CartResponse> {
    self.send_json(self.client.post(self.url("/update")).json(request)).await
  }

  #[instrument(name = "HttpCartApi::remove_item", skip(self), err(Display))]
  async fn remove_item(&self, variant_id: VariantId) -> CartResult<CartResponse> {
    self
      .send_json(self.client.delete(self.url(&format!("/{}", variant_id))))
      .await
  }

  #[instrument(name = "HttpCartApi::clear_cart", skip(self), err(Display))]
  async fn clear_cart(&self) -> CartResult<()> {
    self.send(self.client.delete(self.url(""))).await?;
    Ok(())
  }
}
