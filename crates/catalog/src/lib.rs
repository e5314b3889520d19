use std::sync::{Arc, RwLock};

use backend_api::{ApiError, ProductSource};
use domain::{Category, Product};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// In-memory mirror of the backend's active product list.
///
/// The whole list is swapped on refresh: readers observe either the
/// previous complete list or the new one, never a partial state. The
/// cache never writes back to the backend, and a refresh does not
/// invalidate product snapshots already copied into cart lines.
pub struct CatalogCache {
    source: Arc<dyn ProductSource>,
    products: RwLock<Arc<Vec<Product>>>,
}

impl CatalogCache {
    /// Create an empty cache over a product source. Call `refresh` to
    /// populate it.
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self {
            source,
            products: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Fetch the active product list and replace the cache contents.
    /// Fetch errors surface to the caller and leave the previous list
    /// in place; there is no automatic retry.
    pub async fn refresh(&self) -> Result<usize> {
        let products = self.source.fetch_active_products().await?;
        let count = products.len();

        let mut guard = self.products.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(products);

        info!(products = count, "Catalog refreshed");
        Ok(count)
    }

    fn snapshot(&self) -> Arc<Vec<Product>> {
        self.products
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Cached snapshot of a product.
    pub fn get(&self, id: i64) -> Result<Product> {
        self.snapshot()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    /// Cached products in backend-provided order, optionally filtered
    /// to one category.
    pub fn list(&self, filter: Option<Category>) -> Vec<Product> {
        let snapshot = self.snapshot();
        debug!(cached = snapshot.len(), ?filter, "Listing catalog");

        snapshot
            .iter()
            .filter(|p| filter.map_or(true, |c| p.category == c))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
