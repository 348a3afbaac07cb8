//! Product management commands.

use std::path::Path;

use tracing::{error, info};

use luxelane_storefront::admin::ProductForm;

use super::open_store;

/// Validate `form` and add it to the catalog under `data_dir`.
///
/// The storefront server must not be running on the same directory.
///
/// # Errors
///
/// Returns an error if the form is invalid or the catalog cannot be written.
pub fn add(data_dir: &Path, form: ProductForm) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(data_dir);

    let product = match form.into_product(store.next_product_id()) {
        Ok(product) => product,
        Err(errors) => {
            error!("Product validation failed:");
            for err in &errors {
                error!("  - {err}");
            }
            return Err(format!("{} validation errors found", errors.len()).into());
        }
    };

    let id = product.id.clone();
    store.add_product(product)?;

    info!(id = %id, products = store.products().len(), "Product added");
    Ok(())
}
