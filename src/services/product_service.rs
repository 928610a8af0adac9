// src/services/product_service.rs
//! Client side of the remote product service.
//!
//! The admin screen only ever talks to the service through [`ProductService`],
//! so tests can swap in an in-memory implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::dtos::product::{MessageResponse, ProductPayload};
use crate::error::{ServiceError, ServiceResult};
use crate::models::product::Product;

#[async_trait]
pub trait ProductService: Send + Sync {
    /// `GET /products`
    async fn list(&self) -> ServiceResult<Vec<Product>>;

    /// `POST /products`, returns the service message if one was sent.
    async fn create(&self, payload: &ProductPayload) -> ServiceResult<Option<String>>;

    /// `PUT /product/{barcode}`. `barcode` is the key the record was loaded
    /// under; `payload.barcode` may differ.
    async fn update(&self, barcode: &str, payload: &ProductPayload) -> ServiceResult<Option<String>>;

    /// `DELETE /product/{barcode}`
    async fn delete(&self, barcode: &str) -> ServiceResult<Option<String>>;
}

/// Remote product service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProductService {
    base_url: Url,
    client: Client,
}

impl HttpProductService {
    pub fn new(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: &str, client: Client) -> ServiceResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ServiceError::Url(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::Url(format!("{base_url} cannot be a base")));
        }
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded segments to the base path.
    fn url(&self, segments: &[&str]) -> ServiceResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl ProductService for HttpProductService {
    #[instrument(skip(self))]
    async fn list(&self) -> ServiceResult<Vec<Product>> {
        let response = self.client.get(self.url(&["products"])?).send().await?;
        let products: Vec<Product> = decode(check(response).await?).await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    #[instrument(skip(self, payload), fields(barcode = %payload.barcode))]
    async fn create(&self, payload: &ProductPayload) -> ServiceResult<Option<String>> {
        let response = self
            .client
            .post(self.url(&["products"])?)
            .json(payload)
            .send()
            .await?;
        Ok(message_of(check(response).await?).await)
    }

    #[instrument(skip(self, payload), fields(new_barcode = %payload.barcode))]
    async fn update(&self, barcode: &str, payload: &ProductPayload) -> ServiceResult<Option<String>> {
        let response = self
            .client
            .put(self.url(&["product", barcode])?)
            .json(payload)
            .send()
            .await?;
        Ok(message_of(check(response).await?).await)
    }

    #[instrument(skip(self))]
    async fn delete(&self, barcode: &str) -> ServiceResult<Option<String>> {
        let response = self.client.delete(self.url(&["product", barcode])?).send().await?;
        Ok(message_of(check(response).await?).await)
    }
}

/// Turns a non-2xx response into [`ServiceError::Server`], keeping its message.
async fn check(response: Response) -> ServiceResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = message_of(response).await;
    warn!(%status, message = message.as_deref().unwrap_or(""), "Product service rejected request");
    Err(ServiceError::Server { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> ServiceResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode(e.to_string()))
}

// Bodies are optional; anything that is not `{ message }` counts as no message.
async fn message_of(response: Response) -> Option<String> {
    let bytes = response.bytes().await.ok()?;
    serde_json::from_slice::<MessageResponse>(&bytes)
        .ok()
        .and_then(|body| body.message)
}
