use poem_openapi::Object;

use business::domain::cart::model::{Cart, Product};

#[derive(Debug, Clone, Object)]
pub struct UpdateProductAmountRequest {
    /// Desired quantity; zero or negative values are ignored
    pub amount: i64,
}

#[derive(Debug, Clone, Object)]
pub struct CartProductResponse {
    /// Product identifier
    pub id: i64,
    /// Product title
    pub title: String,
    /// Unit price
    pub price: f64,
    /// Product image URL
    pub image: String,
    /// Units in the cart
    pub amount: u32,
    /// Price times amount
    pub subtotal: f64,
}

impl From<&Product> for CartProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.value(),
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            amount: product.amount,
            subtotal: product.subtotal(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartResponse {
    /// Cart lines in insertion order
    pub items: Vec<CartProductResponse>,
    /// Sum of all subtotals
    pub total: f64,
    /// Total number of units
    pub item_count: u64,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            items: cart.iter().map(CartProductResponse::from).collect(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}
