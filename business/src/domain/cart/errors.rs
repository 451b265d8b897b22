use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::ProductId;

use super::notification::CartNotification;

/// Structural violations of the cart's uniqueness and quantity rules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CartIntegrityError {
    #[error("cart.duplicate_product")]
    DuplicateProduct(ProductId),
    #[error("cart.empty_amount")]
    EmptyAmount(ProductId),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CartError {
    #[error("cart.stock_exceeded")]
    OutOfStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },
    #[error("cart.add_failed")]
    AddFailed(#[source] RepositoryError),
    #[error("cart.remove_failed")]
    RemoveFailed(#[source] RepositoryError),
    #[error("cart.update_failed")]
    UpdateFailed(#[source] RepositoryError),
}

impl CartError {
    /// The single user-facing alert a caller should raise for this failure.
    pub fn notification(&self) -> CartNotification {
        match self {
            CartError::OutOfStock { .. } => CartNotification::StockExceeded,
            CartError::AddFailed(_) => CartNotification::AddFailed,
            CartError::RemoveFailed(_) => CartNotification::RemoveFailed,
            CartError::UpdateFailed(_) => CartNotification::UpdateFailed,
        }
    }

    /// The port failure behind this error, if any.
    pub fn cause(&self) -> Option<&RepositoryError> {
        match self {
            CartError::OutOfStock { .. } => None,
            CartError::AddFailed(e) | CartError::RemoveFailed(e) | CartError::UpdateFailed(e) => {
                Some(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_each_error_to_its_notification() {
        let out_of_stock = CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 3,
            available: 2,
        };

        assert_eq!(out_of_stock.notification(), CartNotification::StockExceeded);
        assert_eq!(
            CartError::AddFailed(RepositoryError::Network).notification(),
            CartNotification::AddFailed
        );
        assert_eq!(
            CartError::RemoveFailed(RepositoryError::NotFound).notification(),
            CartNotification::RemoveFailed
        );
        assert_eq!(
            CartError::UpdateFailed(RepositoryError::Persistence).notification(),
            CartNotification::UpdateFailed
        );
    }

    #[test]
    fn should_expose_cause_only_for_port_failures() {
        let out_of_stock = CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 3,
            available: 2,
        };

        assert!(out_of_stock.cause().is_none());
        assert_eq!(
            CartError::AddFailed(RepositoryError::NotFound).cause(),
            Some(&RepositoryError::NotFound)
        );
    }
}
