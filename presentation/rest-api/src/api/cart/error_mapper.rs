use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart::errors::CartError;
use business::domain::errors::RepositoryError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for CartError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match self.cause() {
            None => (StatusCode::CONFLICT, "OutOfStock"),
            Some(RepositoryError::NotFound) => (StatusCode::NOT_FOUND, "NotFound"),
            Some(RepositoryError::Network | RepositoryError::MalformedResponse) => {
                (StatusCode::BAD_GATEWAY, "UpstreamError")
            }
            Some(RepositoryError::Persistence) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError")
            }
        };
        let notification = self.notification();

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message: notification.code().to_string(),
                detail: Some(notification.message().to_string()),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::shared::value_objects::ProductId;

    #[test]
    fn should_map_out_of_stock_to_conflict() {
        let (status, json) = CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 3,
            available: 2,
        }
        .into_error_response();

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json.0.message, "cart.stock_exceeded");
    }

    #[test]
    fn should_map_missing_line_to_not_found() {
        let (status, json) =
            CartError::RemoveFailed(RepositoryError::NotFound).into_error_response();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json.0.message, "cart.remove_failed");
    }

    #[test]
    fn should_map_unreachable_upstream_to_bad_gateway() {
        let (status, json) = CartError::AddFailed(RepositoryError::Network).into_error_response();

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json.0.name, "UpstreamError");
    }

    #[test]
    fn should_map_storage_failure_to_internal_error() {
        let (status, json) =
            CartError::UpdateFailed(RepositoryError::Persistence).into_error_response();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.0.message, "cart.update_failed");
    }
}
