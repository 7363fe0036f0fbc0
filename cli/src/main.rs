// storefront-cli/src/main.rs

mod config;
mod session;

use crate::config::AppConfig;
use crate::session::{SavedSession, SessionFile};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use storefront_cart::{
  CartItem, CartProvider, CartTotals, HttpCartApi, JsonFileStore, Session, VariantId,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront cart from the command line", long_about = None)]
struct Cli {
  #[command(subcommand)]
  cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the cart lines and totals
  Show,

  /// Add a variant, merging into an existing line for the same variant
  Add {
    #[arg(long = "variant")]
    variant_id: VariantId,
    #[arg(long)]
    price: f64,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    quantity: i64,
    #[arg(long)]
    name: String,
    #[arg(long)]
    slug: String,
    #[arg(long, default_value = "")]
    image: String,
    #[arg(long, default_value = "")]
    brand_name: String,
    #[arg(long, default_value = "")]
    brand_slug: String,
    #[arg(long, default_value_t = 0)]
    stock: i64,
  },

  /// Remove the line for a variant
  Remove {
    #[arg(long = "variant")]
    variant_id: VariantId,
  },

  /// Set a line's quantity; 0 or less removes it
  SetQuantity {
    #[arg(long = "variant")]
    variant_id: VariantId,
    #[arg(long, allow_negative_numbers = true)]
    quantity: i64,
  },

  /// Empty the cart
  Clear,

  /// Sign in: push the guest cart to the server and switch to it
  Login {
    #[arg(long, env = "STOREFRONT_API_TOKEN", hide_env_values = true)]
    token: String,
  },

  /// Sign out and start over with an empty guest cart
  Logout,
}

#[derive(Serialize)]
struct CartView<'a> {
  authenticated: bool,
  items: &'a [CartItem],
  totals: CartTotals,
}

fn print_cart(provider: &CartProvider) -> Result<()> {
  let view = CartView {
    authenticated: provider.is_authenticated(),
    items: provider.items(),
    totals: provider.totals(),
  };
  println!("{}", serde_json::to_string_pretty(&view)?);
  Ok(())
}

/// Restores the provider for whatever session the last run left behind.
fn build_provider(config: &AppConfig, session_file: &SessionFile) -> Result<CartProvider> {
  let store = Arc::new(JsonFileStore::new(&config.data_dir, &config.cart_key));
  let session = match session_file.load()? {
    Some(saved) => {
      let api_config = config
        .api_config(&saved.token)
        .context("A saved session exists but STOREFRONT_API_URL is not set")?;
      Session::Authenticated(Arc::new(HttpCartApi::new(api_config)?))
    }
    None => Session::Guest,
  };
  Ok(CartProvider::with_session(store, session))
}

async fn run(cli: Cli, config: AppConfig) -> Result<()> {
  let session_file = SessionFile::new(config.session_path());
  let mut provider = build_provider(&config, &session_file)?;
  provider.hydrate().await.context("Failed to load cart")?;

  match cli.cmd {
    Commands::Show => {}
    Commands::Add {
      variant_id,
      price,
      quantity,
      name,
      slug,
      image,
      brand_name,
      brand_slug,
      stock,
    } => {
      let item = CartItem::new(variant_id, price, quantity, name, slug)
        .with_image(image)
        .with_brand(brand_name, brand_slug)
        .with_stock(stock);
      provider.add_item(item).await?;
    }
    Commands::Remove { variant_id } => provider.remove_item(variant_id).await?,
    Commands::SetQuantity { variant_id, quantity } => provider.update_quantity(variant_id, quantity).await?,
    Commands::Clear => provider.clear().await?,
    Commands::Login { token } => {
      if provider.is_authenticated() {
        bail!("Already signed in; run `storefront logout` first");
      }
      let api_config = config
        .api_config(&token)
        .context("STOREFRONT_API_URL must be set to sign in")?;
      provider.login(Arc::new(HttpCartApi::new(api_config)?)).await?;
      session_file.save(&SavedSession { token })?;
      tracing::info!(path = %session_file.path().display(), "Session saved.");
    }
    Commands::Logout => {
      provider.logout()?;
      session_file.remove()?;
    }
  }

  print_cart(&provider)
}

#[tokio::main]
async fn main() -> Result<()> {
  // stdout carries the cart JSON, logs go to stderr.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load configuration.");
      return Err(e.into());
    }
  };

  run(cli, config).await
}
