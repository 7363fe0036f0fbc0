// storefront-cli/src/config.rs

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use storefront_cart::store::DEFAULT_CART_KEY;
use storefront_cart::{CartError, CartResult, HttpCartApiConfig};

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub data_dir: PathBuf,
  pub cart_key: String,
  /// Without it the CLI only ever runs a guest cart.
  pub api_url: Option<String>,
  pub http_timeout: Duration,
}

impl AppConfig {
  pub fn from_env() -> CartResult<Self> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; `from_env` passes the
  /// process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CartResult<Self> {
    let data_dir = lookup("STOREFRONT_DATA_DIR")
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from(".storefront"));
    let cart_key = lookup("STOREFRONT_CART_KEY").unwrap_or_else(|| DEFAULT_CART_KEY.to_string());
    if cart_key.is_empty() || cart_key.contains(|c: char| c == '/' || c == '\\') {
      return Err(CartError::Config(format!("Invalid STOREFRONT_CART_KEY: '{}'", cart_key)));
    }
    let api_url = lookup("STOREFRONT_API_URL").filter(|url| !url.trim().is_empty());
    let http_timeout_secs = lookup("STOREFRONT_HTTP_TIMEOUT_SECS")
      .unwrap_or_else(|| "30".to_string())
      .parse::<u64>()
      .map_err(|e| CartError::Config(format!("Invalid STOREFRONT_HTTP_TIMEOUT_SECS: {}", e)))?;

    tracing::debug!(data_dir = %data_dir.display(), %cart_key, remote = api_url.is_some(), "Configuration loaded.");

    Ok(Self {
      data_dir,
      cart_key,
      api_url,
      http_timeout: Duration::from_secs(http_timeout_secs),
    })
  }

  pub fn session_path(&self) -> PathBuf {
    self.data_dir.join(format!("{}.session.json", self.cart_key))
  }

  /// HTTP client settings for `token`, or `None` when no API URL is set.
  pub fn api_config(&self, token: &str) -> Option<HttpCartApiConfig> {
    self.api_url.as_ref().map(|url| {
      HttpCartApiConfig::new(url.clone())
        .with_timeout(self.http_timeout)
        .with_bearer_token(token)
    })
  }
}
