use std::sync::Arc;

use crate::assets::CardAssets;
use crate::config::AppConfig;
use crate::storage::BlobStore;

/// Application shared state accessible from every axum handler.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    assets: CardAssets,
    store: Arc<dyn BlobStore>,
}

impl SharedState {
    pub fn new(config: AppConfig, assets: CardAssets, store: Arc<dyn BlobStore>) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                config,
                assets,
                store,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn assets(&self) -> &CardAssets {
        &self.inner.assets
    }

    pub fn store(&self) -> &dyn BlobStore {
        self.inner.store.as_ref()
    }
}
