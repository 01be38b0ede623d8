//! Catalog inspection commands.

use std::path::Path;

use verdant_core::types::{ProductId, money};
use verdant_storefront::catalog::{Catalog, CatalogError};

/// Errors from catalog commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("product not found: {0}")]
    NotFound(ProductId),
}

/// Validate the catalog file and report a summary.
pub fn validate(path: &Path) -> Result<(), CommandError> {
    let catalog = Catalog::load(path)?;
    println!(
        "ok: {} products in {}",
        catalog.len(),
        path.display()
    );
    Ok(())
}

/// List every product with id, price, and title.
pub fn list(path: &Path) -> Result<(), CommandError> {
    let catalog = Catalog::load(path)?;
    for product in catalog.products() {
        println!(
            "{}  {:>10}  {}",
            product.id,
            money::format_minor(money::to_minor_units(product.price)),
            product.title
        );
    }
    Ok(())
}

/// Show one product as pretty JSON.
pub fn show(path: &Path, id: &str) -> Result<(), CommandError> {
    let catalog = Catalog::load(path)?;
    let id = ProductId::new(id);
    let product = catalog.get(&id).ok_or(CommandError::NotFound(id))?;
    match serde_json::to_string_pretty(product) {
        Ok(json) => println!("{json}"),
        Err(e) => return Err(CommandError::Catalog(CatalogError::Parse(e))),
    }
    Ok(())
}
