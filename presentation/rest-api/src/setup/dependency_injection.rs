use std::sync::Arc;

use business::application::cart::add_product::AddProductUseCaseImpl;
use business::application::cart::get_cart::GetCartUseCaseImpl;
use business::application::cart::remove_product::RemoveProductUseCaseImpl;
use business::application::cart::store::CartStore;
use business::application::cart::update_amount::UpdateProductAmountUseCaseImpl;
use business::domain::logger::Logger;

use logger::TracingLogger;
use storefront::catalog::ProductCatalogHttp;
use storefront::client::StorefrontClient;
use storefront::stock::StockServiceHttp;

use crate::config::app_config::AppConfig;
use crate::config::storage_config::init_storage;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub cart_api: crate::api::cart::routes::CartApi,
}

impl DependencyContainer {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters
        let storage = init_storage(&config.storage).await?;
        let stock_client =
            StorefrontClient::new(&config.storefront.base_url, config.storefront.timeout)?;
        let catalog_client =
            StorefrontClient::new(&config.storefront.base_url, config.storefront.timeout)?;
        let stock = Arc::new(StockServiceHttp::new(stock_client));
        let catalog = Arc::new(ProductCatalogHttp::new(catalog_client));

        // Cart state, restored once for the process lifetime
        let store = Arc::new(CartStore::load(storage, logger.clone()).await);

        // Cart use cases
        let get_cart_use_case = Arc::new(GetCartUseCaseImpl {
            store: store.clone(),
            logger: logger.clone(),
        });
        let add_product_use_case = Arc::new(AddProductUseCaseImpl {
            store: store.clone(),
            stock: stock.clone(),
            catalog,
            logger: logger.clone(),
        });
        let remove_product_use_case = Arc::new(RemoveProductUseCaseImpl {
            store: store.clone(),
            logger: logger.clone(),
        });
        let update_amount_use_case = Arc::new(UpdateProductAmountUseCaseImpl {
            store,
            stock,
            logger,
        });

        let cart_api = crate::api::cart::routes::CartApi::new(
            get_cart_use_case,
            add_product_use_case,
            remove_product_use_case,
            update_amount_use_case,
        );

        Ok(Self {
            health_api,
            cart_api,
        })
    }
}
