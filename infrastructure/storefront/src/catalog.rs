use async_trait::async_trait;

use business::domain::cart::model::CatalogProduct;
use business::domain::cart::services::ProductCatalog;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::ProductId;

use crate::client::StorefrontClient;

pub struct ProductCatalogHttp {
    client: StorefrontClient,
}

impl ProductCatalogHttp {
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductCatalog for ProductCatalogHttp {
    async fn get(&self, product_id: ProductId) -> Result<CatalogProduct, RepositoryError> {
        let url = self.client.product_url(product_id)?;
        self.client.get_json::<CatalogProduct>(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_decode_product_payload_ignoring_extra_fields() {
        let raw = r#"{
            "id": 5,
            "title": "Shoe",
            "price": 100,
            "image": "https://cdn.example.com/shoe.jpg",
            "brand": "ignored"
        }"#;

        let product: CatalogProduct = serde_json::from_str(raw).unwrap();

        assert_eq!(product.id, ProductId::new(5));
        assert_eq!(product.title, "Shoe");
        assert_eq!(product.price, 100.0);
    }
}
