use std::sync::{Arc, Mutex};

use anyhow::Result;
use backend_api::ApiClient;
use catalog::CatalogCache;
use checkout::CheckoutOrchestrator;
use common::AppConfig;
use domain::Cart;
use tracing::info;

/// Session state shared across command handlers. Constructed once at
/// startup; the cart lives only as long as the session.
pub struct SessionState {
    pub api: Arc<ApiClient>,
    pub catalog: Arc<CatalogCache>,
    pub cart: Mutex<Cart>,
    pub orchestrator: CheckoutOrchestrator,
}

impl SessionState {
    pub fn new(config: &AppConfig) -> Result<Self> {
        info!(base_url = %config.api.base_url, "Connecting to backend");

        let api = Arc::new(ApiClient::new(&config.api)?);
        let catalog = Arc::new(CatalogCache::new(api.clone()));
        let orchestrator = CheckoutOrchestrator::new(api.clone(), catalog.clone());

        Ok(Self {
            api,
            catalog,
            cart: Mutex::new(Cart::new()),
            orchestrator,
        })
    }
}
