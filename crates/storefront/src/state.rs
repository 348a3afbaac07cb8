//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::notify::NotificationQueue;
use crate::storage::KeyValueStore;
use crate::store::Store;

/// Storage backend erased so the server and tests can share one state type.
pub type DynStorage = Box<dyn KeyValueStore + Send>;

/// The store owned by the HTTP host.
pub type SharedStore = Store<DynStorage, NotificationQueue>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the single store for
/// the process; handlers take the lock for the duration of one operation.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Mutex<SharedStore>,
}

impl AppState {
    /// Create the application state, initializing the store from `storage`.
    ///
    /// Initialization runs here, before any request can observe the store.
    #[must_use]
    pub fn new(config: StorefrontConfig, storage: impl KeyValueStore + Send + 'static) -> Self {
        let mut store = Store::initialize(Box::new(storage) as DynStorage, NotificationQueue::new());
        // Nobody is listening yet; startup notifications were already logged.
        store.notifier_mut().drain();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: Mutex::new(store),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Lock the store for one operation.
    ///
    /// Notifications left queued by an earlier failed request are dropped,
    /// so whatever the caller drains belongs to its own operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if a previous handler panicked while
    /// holding the lock.
    pub fn store(&self) -> Result<MutexGuard<'_, SharedStore>, AppError> {
        let mut store = self.inner.store.lock().map_err(|_| {
            tracing::error!("Store lock poisoned");
            AppError::Internal("store lock poisoned".to_string())
        })?;
        store.notifier_mut().drain();
        Ok(store)
    }
}
