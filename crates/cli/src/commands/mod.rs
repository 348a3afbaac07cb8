//! CLI command implementations.

pub mod catalog;
pub mod product;

use std::path::Path;

use luxelane_storefront::notify::LogNotifier;
use luxelane_storefront::storage::FileStore;
use luxelane_storefront::store::Store;

/// The store for one CLI invocation.
pub type CliStore = Store<FileStore, LogNotifier>;

/// Open the catalog under `data_dir`, seeding it if nothing is stored.
pub fn open_store(data_dir: &Path) -> CliStore {
    Store::initialize(FileStore::new(data_dir), LogNotifier)
}
