use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shopfront_core::domain::product::{Product, ProductId};
use thiserror::Error;

pub const PRODUCTS_PATH: &str = "/api/products";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to `{url}` failed: {source}")]
    Transport { url: String, source: reqwest::Error },
    #[error("`{url}` returned unexpected status {status}")]
    Status { url: String, status: StatusCode },
    #[error("could not decode response from `{url}`: {source}")]
    Decode { url: String, source: reqwest::Error },
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// `Ok(None)` when the service answers 404.
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, ApiError>;
}

#[derive(Clone, Debug)]
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn products_url(&self) -> String {
        format!("{}{PRODUCTS_PATH}", self.base_url)
    }

    fn product_url(&self, id: ProductId) -> String {
        format!("{}{PRODUCTS_PATH}/{id}", self.base_url)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Transport { url: url.to_string(), source })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.products_url();
        let response = self.get(&url).await?;

        if !response.status().is_success() {
            return Err(ApiError::Status { url, status: response.status() });
        }

        response.json::<Vec<Product>>().await.map_err(|source| ApiError::Decode { url, source })
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, ApiError> {
        let url = self.product_url(id);
        let response = self.get(&url).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json::<Product>()
                .await
                .map(Some)
                .map_err(|source| ApiError::Decode { url, source }),
            status => Err(ApiError::Status { url, status }),
        }
    }
}
