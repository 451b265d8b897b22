use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;

use crate::domain::cart::model::{CatalogProduct, Product, StockEntry};
use crate::domain::cart::services::{ProductCatalog, StockService};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::ProductId;
use crate::domain::storage::KeyValueStore;

mock! {
    pub Storage {}

    #[async_trait]
    impl KeyValueStore for Storage {
        async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;
        async fn set(&self, key: &str, value: String) -> Result<(), RepositoryError>;
    }
}

mock! {
    pub Stock {}

    #[async_trait]
    impl StockService for Stock {
        async fn get(&self, product_id: ProductId) -> Result<StockEntry, RepositoryError>;
    }
}

mock! {
    pub Catalog {}

    #[async_trait]
    impl ProductCatalog for Catalog {
        async fn get(&self, product_id: ProductId) -> Result<CatalogProduct, RepositoryError>;
    }
}

mock! {
    pub Log {}

    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

pub type Writes = Arc<Mutex<Vec<(String, String)>>>;

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

pub fn product(id: i64, amount: u32) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {}", id),
        price: 10.0,
        image: format!("https://cdn.example.com/{}.jpg", id),
        amount,
    }
}

pub fn cart_json(products: &[Product]) -> String {
    serde_json::to_string(products).unwrap()
}

/// Storage that serves `initial` on load and records every write.
pub fn recording_storage(initial: Option<String>) -> (Arc<dyn KeyValueStore>, Writes) {
    let writes: Writes = Arc::new(Mutex::new(Vec::new()));
    let recorded = writes.clone();
    let mut storage = MockStorage::new();
    storage
        .expect_get()
        .returning(move |_| Ok(initial.clone()));
    storage.expect_set().returning(move |key, value| {
        recorded.lock().unwrap().push((key.to_string(), value));
        Ok(())
    });
    (Arc::new(storage), writes)
}

pub fn stock_of(amount: u32) -> MockStock {
    let mut stock = MockStock::new();
    stock
        .expect_get()
        .returning(move |id| Ok(StockEntry { id, amount }));
    stock
}

pub fn failing_stock(error: RepositoryError) -> MockStock {
    let mut stock = MockStock::new();
    stock.expect_get().returning(move |_| Err(error.clone()));
    stock
}
