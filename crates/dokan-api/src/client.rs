//! HTTP client for the storefront REST API.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use dokan_core::types::Product;

use crate::catalog::BusinessProfile;
use crate::error::{ApiClientError, ApiResult};
use crate::order::{OrderRequest, OrderResponse};

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Transport timeout in seconds (covers connect + body).
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// HTTP client for catalog reads and order submission.
///
/// Cheap to clone (reqwest's `Client` is an `Arc` internally); the app
/// layer holds one and hands out clones.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client from configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with a JSON body.
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Maps the response status to a typed result.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            // Error bodies are often the same JSON envelope; dig the
            // human message out when it is there.
            let message = serde_json::from_str::<OrderResponse>(&text)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or(text);
            return match status {
                StatusCode::INTERNAL_SERVER_ERROR
                | StatusCode::BAD_GATEWAY
                | StatusCode::SERVICE_UNAVAILABLE => Err(ApiClientError::Server(message)),
                _ => Err(ApiClientError::Rejected(message)),
            };
        }

        response
            .json()
            .await
            .map_err(|e| ApiClientError::InvalidResponse(e.to_string()))
    }

    // ========== Catalog API ==========

    /// Fetches the product catalog.
    pub async fn fetch_products(&self) -> ApiResult<Vec<Product>> {
        self.get("/api/products").await
    }

    /// Fetches one product by slug.
    pub async fn fetch_product(&self, slug: &str) -> ApiResult<Product> {
        self.get(&format!("/api/products/{slug}")).await
    }

    /// Fetches the business profile (delivery fees, courier mode, promos).
    pub async fn fetch_business(&self) -> ApiResult<BusinessProfile> {
        self.get("/api/business").await
    }

    // ========== Order API ==========

    /// Submits an order.
    ///
    /// A `success: false` envelope is NOT an `Err` - the backend uses it
    /// for business rejections (stock changed, phone blocked) and the
    /// orchestrator branches on it. `Err` means the transport or the
    /// contract failed.
    pub async fn create_order(&self, request: &OrderRequest) -> ApiResult<OrderResponse> {
        self.post("/api/orders", request).await
    }
}
