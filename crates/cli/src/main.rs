//! LuxeLane CLI - catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the catalog file (seeds the default products if none exist)
//! lx-cli catalog seed
//!
//! # List products, optionally filtered and sorted
//! lx-cli catalog list --category audio --sort price-low-high
//!
//! # Search names, descriptions, and categories
//! lx-cli catalog search wireless
//!
//! # Add a product
//! lx-cli product add --name "Travel Adapter" --price 24.99 \
//!     --description "Universal travel adapter with USB-C." \
//!     --category accessories --features "USB-C, 150 countries"
//! ```
//!
//! Storage defaults to `STOREFRONT_DATA_DIR` (or `./data`) and can be
//! overridden with `--data-dir`.
//!
//! A running storefront keeps its own copy of the catalog and rewrites the
//! whole file on its next product addition. Stop the server before running
//! `catalog seed` or `product add` against its data directory, or the change
//! will be lost.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lx-cli")]
#[command(author, version, about = "LuxeLane catalog tools")]
struct Cli {
    /// Directory holding the catalog file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and initialize the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Initialize storage, seeding the default catalog if none is stored
    Seed,
    /// List products
    List {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order (`featured`, `price-low-high`, `price-high-low`, `name-a-z`, `name-z-a`)
        #[arg(short, long, default_value = "featured")]
        sort: String,
    },
    /// Search product names, descriptions, and categories
    Search {
        /// Text to look for
        query: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Add a new product to the catalog
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price in dollars, e.g. 49.99
        #[arg(short, long)]
        price: String,

        /// Product description
        #[arg(short, long)]
        description: String,

        /// Category slug
        #[arg(short, long)]
        category: String,

        /// Image URL (defaults to the placeholder)
        #[arg(short, long, default_value = "")]
        image: String,

        /// Comma-separated features
        #[arg(short, long, default_value = "")]
        features: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => luxelane_storefront::config::StorefrontConfig::from_env()?.data_dir,
    };

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Seed => commands::catalog::seed(&data_dir),
            CatalogAction::List { category, sort } => {
                commands::catalog::list(&data_dir, category.as_deref(), &sort);
            }
            CatalogAction::Search { query } => commands::catalog::search(&data_dir, &query),
        },
        Commands::Product { action } => match action {
            ProductAction::Add {
                name,
                price,
                description,
                category,
                image,
                features,
            } => {
                let form = luxelane_storefront::admin::ProductForm {
                    name,
                    price,
                    description,
                    category,
                    image,
                    features,
                };
                commands::product::add(&data_dir, form)?;
            }
        },
    }
    Ok(())
}
