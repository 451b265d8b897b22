use async_trait::async_trait;

use business::domain::cart::model::StockEntry;
use business::domain::cart::services::StockService;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::ProductId;

use crate::client::StorefrontClient;

pub struct StockServiceHttp {
    client: StorefrontClient,
}

impl StockServiceHttp {
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StockService for StockServiceHttp {
    async fn get(&self, product_id: ProductId) -> Result<StockEntry, RepositoryError> {
        let url = self.client.stock_url(product_id)?;
        self.client.get_json::<StockEntry>(url).await
    }
}
