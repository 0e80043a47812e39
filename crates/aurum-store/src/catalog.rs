//! Static data file loading: the product catalog and the pricing table.

use std::path::Path;
use tracing::info;

use aurum_core::{Catalog, PricingTable};

use crate::error::{StoreError, StoreResult};

/// Reads `products.json`.
pub fn load_catalog(path: impl AsRef<Path>) -> StoreResult<Catalog> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| StoreError::catalog(path, e))?;
    let catalog = Catalog::from_json(&raw).map_err(|e| StoreError::catalog(path, e))?;
    info!(?path, products = catalog.len(), "Loaded catalog");
    Ok(catalog)
}

/// Reads `pricing.json`.
pub fn load_pricing(path: impl AsRef<Path>) -> StoreResult<PricingTable> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| StoreError::catalog(path, e))?;
    let table = PricingTable::from_json(&raw).map_err(|e| StoreError::catalog(path, e))?;
    info!(
        ?path,
        metals = table.metal.len(),
        purities = table.purity.len(),
        stones = table.stone.len(),
        "Loaded pricing table"
    );
    Ok(table)
}
