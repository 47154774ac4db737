//! # Catalog
//!
//! Product list fetched once per session from a remote JSON endpoint.
//!
//! ## States
//! - `Loading`: initial, and again on every explicit retry
//! - `Ready`: products parsed, terminal until the next retry
//! - `Failed`: human readable message, terminal until the next retry
//!
//! No automatic retries. The user decides when to reload.
use std::time::Duration;

use cart::Product;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to fetch products, try again.")]
    Status(StatusCode),

    #[error("Something went wrong ({0}), please try again.")]
    Transport(#[from] reqwest::Error),

    #[error("Received an unreadable product list ({0}), please try again.")]
    MalformedBody(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogStatus {
    Loading,
    Ready(Vec<Product>),
    Failed(String),
}

pub struct CatalogLoader {
    client: Client,
    url: String,
    status: CatalogStatus,
}

impl CatalogLoader {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
            status: CatalogStatus::Loading,
        })
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    pub fn products(&self) -> Option<&[Product]> {
        match &self.status {
            CatalogStatus::Ready(products) => Some(products),
            _ => None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Re-enters `Loading` and performs one fetch.
    pub async fn load(&mut self) -> &CatalogStatus {
        self.status = CatalogStatus::Loading;

        self.status = match fetch_catalog(&self.client, &self.url).await {
            Ok(products) => {
                info!("Fetched {} products from {}", products.len(), self.url);
                CatalogStatus::Ready(products)
            }
            Err(e) => {
                if let CatalogError::Status(status) = &e {
                    error!("Catalog endpoint {} answered {status}", self.url);
                } else {
                    error!("Failed to fetch catalog from {}: {e}", self.url);
                }

                CatalogStatus::Failed(e.to_string())
            }
        };

        &self.status
    }
}

pub async fn fetch_catalog(client: &Client, url: &str) -> Result<Vec<Product>, CatalogError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status(status));
    }

    let body = response.text().await?;

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use tokio::net::TcpListener;

    use super::*;
    use crate::test_utils::serve_catalog;

    const PRODUCTS: &str = r#"[
        {"id":1,"title":"Shirt","price":20,"image":"https://example.com/1.png","category":"men's clothing"},
        {"id":2,"title":"Shoe","price":10.5,"image":"https://example.com/2.png"}
    ]"#;

    fn loader(url: String) -> CatalogLoader {
        CatalogLoader::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_ready() {
        let mut loader = loader(serve_catalog(200, PRODUCTS).await);
        assert_eq!(loader.status(), &CatalogStatus::Loading);

        loader.load().await;

        let products = loader.products().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Shirt");
        assert_eq!(products[1].price, 10.5);
    }

    #[tokio::test]
    async fn test_bad_status() {
        let mut loader = loader(serve_catalog(500, "oops").await);

        let status = loader.load().await;

        assert_eq!(
            status,
            &CatalogStatus::Failed("Failed to fetch products, try again.".to_string())
        );
        assert!(loader.products().is_none());
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut loader = loader(serve_catalog(200, r#"{"products": []}"#).await);

        let status = loader.load().await;

        assert!(matches!(status, CatalogStatus::Failed(message) if message.contains("unreadable")));
    }

    #[tokio::test]
    async fn test_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let mut loader = loader(format!("http://{address}/products"));

        assert!(matches!(loader.load().await, CatalogStatus::Failed(_)));
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let mut loader = loader(serve_catalog(503, "").await);
        assert!(matches!(loader.load().await, CatalogStatus::Failed(_)));

        loader.url = serve_catalog(200, PRODUCTS).await;
        loader.load().await;

        assert_eq!(loader.products().map(<[Product]>::len), Some(2));
    }
}
