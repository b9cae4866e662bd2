use std::sync::Arc;

use crate::catalog::{Catalog, FsCatalog};
use crate::config::Config;

pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn Catalog>) -> Arc<Self> {
        Arc::new(Self { catalog })
    }

    pub fn from_config(config: &Config) -> Arc<Self> {
        Self::new(Arc::new(FsCatalog::new(&config.server.data_root)))
    }
}
