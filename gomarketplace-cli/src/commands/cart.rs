//! Cart commands - show and edit the persisted cart.

use anyhow::{Context, Result};
use clap::Args;
use gomarketplace_core::{CartEvent, NewCartItem};
use gomarketplace_store::{CartStore, PersistMode, StoreConfig};
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the add command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Product id.
    #[arg(long)]
    pub id: String,

    /// Product title.
    #[arg(long)]
    pub title: String,

    /// Product image URL.
    #[arg(long, default_value = "")]
    pub image_url: String,

    /// Unit price.
    #[arg(long)]
    pub price: f64,
}

impl AddArgs {
    fn to_item(&self) -> Result<NewCartItem> {
        if self.id.trim().is_empty() {
            anyhow::bail!("Product id must not be empty");
        }
        if !self.price.is_finite() || self.price < 0.0 {
            anyhow::bail!("Invalid price: {}", self.price);
        }
        Ok(NewCartItem::new(
            self.id.clone(),
            self.title.clone(),
            self.image_url.clone(),
            self.price,
        ))
    }
}

async fn open(store_config: &StoreConfig) -> Result<CartStore> {
    CartStore::open_with_config(store_config)
        .await
        .with_context(|| format!("Failed to open cart in {}", store_config.data_dir().display()))
}

/// Opens the cart, applies one event, and leaves storage matching memory.
///
/// In lagged mode a dispatch writes the cart from before the event, and this
/// process exits right after, so the current cart is flushed as well.
async fn apply_once(store_config: &StoreConfig, event: CartEvent) -> Result<CartStore> {
    let store = open(store_config).await?;
    store.dispatch(event).await?;
    if store.persist_mode() == PersistMode::Lagged {
        store.flush().await.context("Failed to flush cart")?;
    }
    Ok(store)
}

/// Runs the list command.
pub async fn list(cli: &Cli, store_config: &StoreConfig) -> Result<()> {
    let store = open(store_config).await?;
    let cart = store.cart().await;
    let totals = cart.totals();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_cart(cart.items(), &totals));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = formatter.format_cart(
                cart.items(),
                &totals,
                store.storage_key(),
                store.last_saved().await,
            )?;
            println!("{output}");
        }
    }

    Ok(())
}

/// Runs the add command.
pub async fn add(args: &AddArgs, cli: &Cli, store_config: &StoreConfig) -> Result<()> {
    let item = args.to_item()?;
    let store = apply_once(store_config, CartEvent::Add(item)).await?;
    info!(id = %args.id, "Added to cart");

    report(&store, "added", &args.id, cli).await
}

/// Runs the increment command.
pub async fn increment(id: &str, cli: &Cli, store_config: &StoreConfig) -> Result<()> {
    let store = apply_once(store_config, CartEvent::Increment(id.to_string())).await?;
    info!(id, "Incremented");

    report(&store, "increment", id, cli).await
}

/// Runs the decrement command.
pub async fn decrement(id: &str, cli: &Cli, store_config: &StoreConfig) -> Result<()> {
    let store = apply_once(store_config, CartEvent::Decrement(id.to_string())).await?;
    info!(id, "Decremented");

    report(&store, "decrement", id, cli).await
}

/// Runs the clear command.
pub async fn clear(cli: &Cli, store_config: &StoreConfig) -> Result<()> {
    let store = apply_once(store_config, CartEvent::Clear).await?;
    info!("Cart cleared");

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                println!("Cart cleared");
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let totals = store.totals().await;
            println!("{}", formatter.format_change("clear", "", None, &totals)?);
        }
    }

    Ok(())
}

/// Prints the line affected by a mutation.
async fn report(store: &CartStore, action: &str, id: &str, cli: &Cli) -> Result<()> {
    let item = store.get(id).await;

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                let formatter = TextFormatter::new(!cli.no_color);
                println!("{}", formatter.format_change(action, id, item.as_ref()));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let totals = store.totals().await;
            println!("{}", formatter.format_change(action, id, item.as_ref(), &totals)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(id: &str, price: f64) -> AddArgs {
        AddArgs {
            id: id.to_string(),
            title: "Shirt".to_string(),
            image_url: "u".to_string(),
            price,
        }
    }

    #[test]
    fn test_to_item() {
        let item = args("a", 10.0).to_item().unwrap();
        assert_eq!(item, NewCartItem::new("a", "Shirt", "u", 10.0));
    }

    #[test]
    fn test_to_item_rejects_bad_input() {
        assert!(args(" ", 10.0).to_item().is_err());
        assert!(args("a", -1.0).to_item().is_err());
        assert!(args("a", f64::INFINITY).to_item().is_err());
    }

    fn lagged_config(dir: &TempDir) -> StoreConfig {
        StoreConfig {
            persist_mode: PersistMode::Lagged,
            data_dir: Some(dir.path().to_path_buf()),
            ..StoreConfig::default()
        }
    }

    #[tokio::test]
    async fn test_lagged_one_shot_runs_accumulate() {
        let temp_dir = TempDir::new().unwrap();
        let config = lagged_config(&temp_dir);
        let shirt = args("a", 10.0).to_item().unwrap();

        for _ in 0..3 {
            apply_once(&config, CartEvent::Add(shirt.clone())).await.unwrap();
        }
        apply_once(&config, CartEvent::Decrement("a".to_string())).await.unwrap();

        let store = open(&config).await.unwrap();
        assert_eq!(store.get("a").await.unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_immediate_one_shot_runs_accumulate() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig {
            data_dir: Some(temp_dir.path().to_path_buf()),
            ..StoreConfig::default()
        };

        apply_once(&config, CartEvent::Add(args("a", 10.0).to_item().unwrap()))
            .await
            .unwrap();
        apply_once(&config, CartEvent::Increment("a".to_string()))
            .await
            .unwrap();

        let store = open(&config).await.unwrap();
        assert_eq!(store.get("a").await.unwrap().quantity, 2);
        assert!(store.last_saved().await.is_some());
    }
}
