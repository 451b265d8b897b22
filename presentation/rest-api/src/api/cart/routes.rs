use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};

use business::domain::cart::use_cases::add_product::{AddProductParams, AddProductUseCase};
use business::domain::cart::use_cases::get_cart::GetCartUseCase;
use business::domain::cart::use_cases::remove_product::{
    RemoveProductParams, RemoveProductUseCase,
};
use business::domain::cart::use_cases::update_amount::{
    UpdateProductAmountParams, UpdateProductAmountUseCase,
};
use business::domain::shared::value_objects::ProductId;

use crate::api::cart::dto::{CartResponse, UpdateProductAmountRequest};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::tags::ApiTags;

pub struct CartApi {
    get_cart_use_case: Arc<dyn GetCartUseCase>,
    add_product_use_case: Arc<dyn AddProductUseCase>,
    remove_product_use_case: Arc<dyn RemoveProductUseCase>,
    update_amount_use_case: Arc<dyn UpdateProductAmountUseCase>,
}

impl CartApi {
    pub fn new(
        get_cart_use_case: Arc<dyn GetCartUseCase>,
        add_product_use_case: Arc<dyn AddProductUseCase>,
        remove_product_use_case: Arc<dyn RemoveProductUseCase>,
        update_amount_use_case: Arc<dyn UpdateProductAmountUseCase>,
    ) -> Self {
        Self {
            get_cart_use_case,
            add_product_use_case,
            remove_product_use_case,
            update_amount_use_case,
        }
    }
}

/// Shopping cart API
///
/// Every mutation answers with the resulting cart. Refused operations answer
/// with an error whose `message` names the alert the storefront should show.
#[OpenApi]
impl CartApi {
    /// Get the cart
    ///
    /// Returns the cart lines in the order they were added.
    #[oai(path = "/cart", method = "get", tag = "ApiTags::Cart")]
    async fn get_cart(&self) -> GetCartResponse {
        match self.get_cart_use_case.execute().await {
            Ok(cart) => GetCartResponse::Ok(Json(cart.into())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetCartResponse::InternalError(json)
            }
        }
    }

    /// Add one unit of a product
    ///
    /// Adds the product with amount 1, or increments it if already present.
    /// Fails with 409 when the cart already holds every unit in stock.
    #[oai(path = "/cart/products/:product_id", method = "post", tag = "ApiTags::Cart")]
    async fn add_product(&self, product_id: Path<i64>) -> MutateCartResponse {
        let params = AddProductParams {
            product_id: ProductId::new(product_id.0),
        };
        MutateCartResponse::from_result(self.add_product_use_case.execute(params).await)
    }

    /// Remove a product
    ///
    /// Removes the whole line. Fails with 404 when the product is not in the cart.
    #[oai(path = "/cart/products/:product_id", method = "delete", tag = "ApiTags::Cart")]
    async fn remove_product(&self, product_id: Path<i64>) -> MutateCartResponse {
        let params = RemoveProductParams {
            product_id: ProductId::new(product_id.0),
        };
        MutateCartResponse::from_result(self.remove_product_use_case.execute(params).await)
    }

    /// Set the amount of a product
    ///
    /// Non-positive amounts and products not in the cart leave it unchanged.
    /// Fails with 409 when the amount exceeds the available stock.
    #[oai(path = "/cart/products/:product_id", method = "put", tag = "ApiTags::Cart")]
    async fn update_amount(
        &self,
        product_id: Path<i64>,
        body: Json<UpdateProductAmountRequest>,
    ) -> MutateCartResponse {
        let params = UpdateProductAmountParams {
            product_id: ProductId::new(product_id.0),
            amount: body.0.amount,
        };
        MutateCartResponse::from_result(self.update_amount_use_case.execute(params).await)
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetCartResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum MutateCartResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
}

impl MutateCartResponse {
    fn from_result(
        result: Result<business::domain::cart::model::Cart, business::domain::cart::errors::CartError>,
    ) -> Self {
        match result {
            Ok(cart) => MutateCartResponse::Ok(Json(cart.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => MutateCartResponse::NotFound(json),
                    409 => MutateCartResponse::Conflict(json),
                    502 => MutateCartResponse::BadGateway(json),
                    _ => MutateCartResponse::InternalError(json),
                }
            }
        }
    }
}
