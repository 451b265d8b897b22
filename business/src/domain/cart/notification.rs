/// The four alerts a storefront shows when a cart operation is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartNotification {
    StockExceeded,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl CartNotification {
    /// Stable identifier, usable as an i18n key.
    pub fn code(&self) -> &'static str {
        match self {
            CartNotification::StockExceeded => "cart.stock_exceeded",
            CartNotification::AddFailed => "cart.add_failed",
            CartNotification::RemoveFailed => "cart.remove_failed",
            CartNotification::UpdateFailed => "cart.update_failed",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CartNotification::StockExceeded => "Requested quantity is out of stock",
            CartNotification::AddFailed => "Could not add the product",
            CartNotification::RemoveFailed => "Could not remove the product",
            CartNotification::UpdateFailed => "Could not change the product quantity",
        }
    }
}

impl std::fmt::Display for CartNotification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
