use common::ApiConfig;
use domain::{
    Category, Client, Delivery, DeliveryStatus, NewClient, NewDelivery, NewProduct, Product, Sale,
    SaleConfirmation, SaleDetail, SaleRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::envelope::{ApiEnvelope, CreatedResponse};
use crate::Result;

/// Optional filters for the product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<Category>,
    pub active: Option<bool>,
}

impl ProductQuery {
    /// Filter for the catalog mirror: active products only.
    pub fn active_only() -> Self {
        Self {
            category: None,
            active: Some(true),
        }
    }

    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("category", category.as_str().to_string()));
        }
        if let Some(active) = self.active {
            pairs.push(("active", active.to_string()));
        }
        pairs
    }
}

/// HTTP client for the bakery backend. Thin wrapper over reqwest that
/// decodes the `{success, data, error}` envelope on every response.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with the configured base URL and request timeout.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        debug!(path, "GET request");

        let response = self.http.get(self.url(path)).query(query).send().await?;
        let envelope: ApiEnvelope<T> = response.json().await?;
        envelope.into_result()
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!(path, "POST request");

        let response = self.http.post(self.url(path)).json(body).send().await?;
        let envelope: ApiEnvelope<T> = response.json().await?;
        envelope.into_result()
    }

    // Products

    pub async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        self.get("/products", &query.to_pairs()).await
    }

    pub async fn get_product(&self, id: i64) -> Result<Product> {
        self.get(&format!("/products/{}", id), &[]).await
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<i64> {
        let created: CreatedResponse = self.post("/products", product).await?;
        Ok(created.id)
    }

    // Clients

    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        self.get("/clients", &[]).await
    }

    pub async fn create_client(&self, client: &NewClient) -> Result<i64> {
        let created: CreatedResponse = self.post("/clients", client).await?;
        Ok(created.id)
    }

    // Sales

    pub async fn list_sales(&self) -> Result<Vec<Sale>> {
        self.get("/sales", &[]).await
    }

    pub async fn get_sale(&self, id: i64) -> Result<SaleDetail> {
        self.get(&format!("/sales/{}", id), &[]).await
    }

    /// Submit a sale. The backend validates stock and either commits
    /// the whole request (decrementing stock for every item) or rejects
    /// it with no partial decrement.
    pub async fn create_sale(&self, request: &SaleRequest) -> Result<SaleConfirmation> {
        self.post("/sales", request).await
    }

    // Deliveries

    pub async fn list_deliveries(&self, status: Option<DeliveryStatus>) -> Result<Vec<Delivery>> {
        let query = match status {
            Some(status) => vec![("status", status.as_str().to_string())],
            None => Vec::new(),
        };
        self.get("/deliveries", &query).await
    }

    pub async fn create_delivery(&self, delivery: &NewDelivery) -> Result<i64> {
        let created: CreatedResponse = self.post("/deliveries", delivery).await?;
        Ok(created.id)
    }

    pub async fn update_delivery_status(&self, id: i64, status: DeliveryStatus) -> Result<()> {
        let path = format!("/deliveries/{}/status", id);
        debug!(path = %path, status = status.as_str(), "PATCH request");

        let body = serde_json::json!({ "status": status });
        let response = self.http.patch(self.url(&path)).json(&body).send().await?;
        let envelope: ApiEnvelope<serde_json::Value> = response.json().await?;
        envelope.into_unit()
    }
}
