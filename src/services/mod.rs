//! Business logic services

pub mod catalog;

use std::sync::Arc;

use crate::repository::BookStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    store: Arc<dyn BookStore>,
}

impl Services {
    /// Create all services on top of the given book store
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store.clone()),
            store,
        }
    }

    /// Check that storage is reachable
    pub async fn ping_storage(&self) -> crate::error::AppResult<()> {
        self.store.ping().await
    }
}
