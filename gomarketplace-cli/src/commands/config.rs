//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use gomarketplace_store::{default_config_dir, PersistMode, StoreConfig};
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration and data paths.
    Path,

    /// Set the persist mode.
    Mode {
        /// Mode: immediate or lagged.
        mode: String,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli, store_config: &StoreConfig) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli, store_config),
        ConfigAction::Path => show_paths(cli, store_config),
        ConfigAction::Mode { mode } => set_mode(mode, cli).await,
        ConfigAction::Reset => reset_config(cli).await,
    }
}

fn show_config(cli: &Cli, store_config: &StoreConfig) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_config(store_config));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(store_config)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli, store_config: &StoreConfig) -> Result<()> {
    let config_dir = default_config_dir();
    let config_path = cli.config_path();
    let data_dir = store_config.data_dir();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Config file:   {}", config_path.display());
            println!("Data dir:      {}", data_dir.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "config_file": config_path.display().to_string(),
                "data_dir": data_dir.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_mode(mode: &str, cli: &Cli) -> Result<()> {
    let mode: PersistMode = mode.parse()?;

    // Re-read from disk so a one-off --data-dir is not saved.
    let on_disk = StoreConfig::load_from(&cli.config_path()).await?;
    let updated = StoreConfig {
        persist_mode: mode,
        ..on_disk
    };
    updated.save_to(&cli.config_path()).await?;

    info!(mode = %mode, "Persist mode updated");
    if !cli.quiet {
        println!("Persist mode set to: {mode}");
    }

    Ok(())
}

async fn reset_config(cli: &Cli) -> Result<()> {
    let path = cli.config_path();

    if tokio::fs::try_exists(&path).await? {
        tokio::fs::remove_file(&path).await?;
        info!(path = %path.display(), "Configuration reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }

    Ok(())
}
