// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! GoMarketplace CLI - inspect and edit the persisted shopping cart.
//!
//! # Examples
//!
//! ```bash
//! # Show the cart (default command)
//! gomarketplace
//!
//! # Add a product (or bump its quantity if already present)
//! gomarketplace add --id a --title Shirt --image-url https://img/a.png --price 10
//!
//! # Change quantities
//! gomarketplace inc a
//! gomarketplace dec a
//!
//! # JSON output
//! gomarketplace --format json --pretty
//!
//! # Use the legacy one-write-behind persistence timing
//! gomarketplace config mode lagged
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use gomarketplace_store::{LogLevel, StoreConfig};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{cart, config};
use output::TextFormatter;

// ============================================================================
// CLI Definition
// ============================================================================

/// GoMarketplace CLI - persisted shopping cart.
#[derive(Parser)]
#[command(name = "gomarketplace")]
#[command(about = "Inspect and edit the GoMarketplace shopping cart")]
#[command(long_about = r#"
GoMarketplace keeps a shopping cart in local storage.

The cart is an ordered list of product lines (id, title, image, price,
quantity). Every change rewrites the whole cart under a single storage key.

Examples:
  gomarketplace                          # Show the cart
  gomarketplace add --id a --title Shirt --image-url u --price 10
  gomarketplace inc a                    # One more of "a"
  gomarketplace dec a                    # One fewer; removes at 1
  gomarketplace --format json            # JSON output
"#)]
#[command(version)]
#[command(author = "GoMarketplace Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'list' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Config file to use instead of the default location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory override for cart storage.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Path of the config file in effect.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(StoreConfig::default_path)
    }
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the cart (default if no command specified).
    #[command(visible_alias = "ls")]
    List,

    /// Add a product, or bump its quantity if it is already in the cart.
    #[command(visible_alias = "a")]
    Add(cart::AddArgs),

    /// Increase the quantity of a line by one.
    #[command(visible_alias = "inc")]
    Increment {
        /// Product id.
        id: String,
    },

    /// Decrease the quantity of a line by one, removing it at one.
    #[command(visible_alias = "dec")]
    Decrement {
        /// Product id.
        id: String,
    },

    /// Remove every line from the cart.
    Clear,

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// General error.
    Error = 1,
    /// Storage could not be read or written.
    Storage = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("gomarketplace=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("gomarketplace={level}")))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is not up yet; a broken config is reported below instead.
    let loaded = StoreConfig::load_from(&cli.config_path()).await;
    let level = loaded.as_ref().map_or(LogLevel::default(), |c| c.log_level);
    setup_logging(cli.verbose, cli.quiet, level);

    let result = match loaded {
        Ok(mut store_config) => {
            if let Some(dir) = &cli.data_dir {
                store_config.data_dir = Some(dir.clone());
            }
            run(&cli, &store_config).await
        }
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        if !cli.quiet {
            let formatter = TextFormatter::new(!cli.no_color);
            eprintln!("{}", formatter.format_error(&format!("{e:#}")));
        }
        let code = if e.downcast_ref::<gomarketplace_store::StoreError>().is_some_and(
            gomarketplace_store::StoreError::is_transient,
        ) {
            ExitCode::Storage
        } else {
            ExitCode::Error
        };
        std::process::exit(code as i32);
    }

    Ok(())
}

/// Dispatches the parsed command.
async fn run(cli: &Cli, store_config: &StoreConfig) -> Result<()> {
    match &cli.command {
        Some(Commands::List) | None => cart::list(cli, store_config).await,
        Some(Commands::Add(args)) => cart::add(args, cli, store_config).await,
        Some(Commands::Increment { id }) => cart::increment(id, cli, store_config).await,
        Some(Commands::Decrement { id }) => cart::decrement(id, cli, store_config).await,
        Some(Commands::Clear) => cart::clear(cli, store_config).await,
        Some(Commands::Config(args)) => config::run(args, cli, store_config).await,
    }
}
