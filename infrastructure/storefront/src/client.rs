use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::ProductId;

#[derive(Debug, thiserror::Error)]
pub enum StorefrontClientError {
    #[error("storefront.invalid_base_url")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("storefront.http_client")]
    HttpClient(#[from] reqwest::Error),
}

/// Shared HTTP client for the storefront API (`/stock/{id}`, `/products/{id}`).
pub struct StorefrontClient {
    pub client: Client,
    pub base_url: Url,
}

impl StorefrontClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StorefrontClientError> {
        let mut base_url = Url::parse(base_url)?;
        // `Url::join` drops the last segment unless the path ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Returns the stock endpoint URL for a product.
    pub fn stock_url(&self, product_id: ProductId) -> Result<Url, RepositoryError> {
        self.endpoint(&format!("stock/{}", product_id))
    }

    /// Returns the product metadata endpoint URL.
    pub fn product_url(&self, product_id: ProductId) -> Result<Url, RepositoryError> {
        self.endpoint(&format!("products/{}", product_id))
    }

    fn endpoint(&self, path: &str) -> Result<Url, RepositoryError> {
        self.base_url
            .join(path)
            .map_err(|_| RepositoryError::network())
    }

    /// GETs `url` and decodes the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RepositoryError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|_| RepositoryError::network())?;

        classify_status(response.status())?;

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                RepositoryError::malformed_response()
            } else {
                RepositoryError::network()
            }
        })
    }
}

/// Maps a response status to the port error it stands for, if any.
pub fn classify_status(status: StatusCode) -> Result<(), RepositoryError> {
    if status == StatusCode::NOT_FOUND {
        return Err(RepositoryError::not_found());
    }
    if !status.is_success() {
        return Err(RepositoryError::network());
    }
    Ok(())
}
