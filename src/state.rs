//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::data::DataStore;
use crate::selector::Selector;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// The data store and selector are built once at startup and only read by
/// handlers, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<DataStore>,
    pub selector: Arc<dyn Selector>,
}

impl AppState {
    /// Creates a new application state from the given configuration, data and selector.
    pub fn new(config: AppConfig, store: DataStore, selector: Arc<dyn Selector>) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            selector,
        }
    }
}
