use async_trait::async_trait;
use domain::{Product, SaleConfirmation, SaleRequest};

use crate::client::{ApiClient, ProductQuery};
use crate::Result;

/// Source of catalog data. The catalog cache reads through this seam
/// so tests can substitute a scripted source.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch the full active product list.
    async fn fetch_active_products(&self) -> Result<Vec<Product>>;
}

/// Submission seam for sales. One call, one atomic server-side
/// transaction; there is no partial commit to observe.
#[async_trait]
pub trait SalesGateway: Send + Sync {
    async fn submit_sale(&self, request: &SaleRequest) -> Result<SaleConfirmation>;
}

#[async_trait]
impl ProductSource for ApiClient {
    async fn fetch_active_products(&self) -> Result<Vec<Product>> {
        self.list_products(&ProductQuery::active_only()).await
    }
}

#[async_trait]
impl SalesGateway for ApiClient {
    async fn submit_sale(&self, request: &SaleRequest) -> Result<SaleConfirmation> {
        self.create_sale(request).await
    }
}
