//! Verdant CLI - Catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate the catalog file the storefront will serve
//! verdant catalog validate
//!
//! # List all products
//! verdant catalog list
//!
//! # Show one product
//! verdant catalog show B0C3H2P1QZ
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "verdant")]
#[command(author, version, about = "Verdant CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and validate the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,

        /// Catalog JSON file
        #[arg(
            short,
            long,
            global = true,
            default_value = "crates/storefront/data/products.json"
        )]
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Validate the catalog file (shape, unique ids, non-negative prices)
    Validate,
    /// List all products
    List,
    /// Show a single product by id
    Show {
        /// Product id
        id: String,
    },
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Catalog { action, path } => match action {
            CatalogAction::Validate => commands::catalog::validate(&path),
            CatalogAction::List => commands::catalog::list(&path),
            CatalogAction::Show { id } => commands::catalog::show(&path, &id),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
