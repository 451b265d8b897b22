use serde::{Deserialize, Serialize};

use super::errors::CartIntegrityError;
use crate::domain::shared::value_objects::ProductId;

/// A cart line: product metadata plus the quantity the customer holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,
}

impl Product {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

/// Product metadata as served by the catalog, before it enters a cart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
}

impl CatalogProduct {
    /// Turns catalog metadata into a fresh cart line holding a single unit.
    pub fn into_cart_product(self) -> Product {
        Product {
            id: self.id,
            title: self.title,
            price: self.price,
            image: self.image,
            amount: 1,
        }
    }
}

/// Units of a product currently available for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StockEntry {
    pub id: ProductId,
    pub amount: u32,
}

/// Ordered cart contents, unique by product id, in insertion order.
///
/// Serializes as a plain JSON array of [`Product`]. Deserialization rejects
/// duplicated ids and zero amounts so a tampered payload never becomes state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.find(id).is_some()
    }

    /// Appends a product not yet in the cart.
    pub fn push_new(&mut self, product: Product) -> Result<(), CartIntegrityError> {
        if product.amount == 0 {
            return Err(CartIntegrityError::EmptyAmount(product.id));
        }
        if self.contains(product.id) {
            return Err(CartIntegrityError::DuplicateProduct(product.id));
        }
        self.items.push(product);
        Ok(())
    }

    /// Adds one unit to an existing line and returns its new amount.
    pub fn increment(&mut self, id: ProductId) -> Option<u32> {
        let product = self.items.iter_mut().find(|p| p.id == id)?;
        product.amount = product.amount.saturating_add(1);
        Some(product.amount)
    }

    /// Sets the amount of an existing line. Returns `Ok(false)` if the product is absent.
    pub fn set_amount(&mut self, id: ProductId, amount: u32) -> Result<bool, CartIntegrityError> {
        if amount == 0 {
            return Err(CartIntegrityError::EmptyAmount(id));
        }
        match self.items.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                product.amount = amount;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes a line, keeping the order of the remaining ones.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let index = self.items.iter().position(|p| p.id == id)?;
        Some(self.items.remove(index))
    }

    /// Sum of price times amount across all lines.
    pub fn total(&self) -> f64 {
        self.items.iter().map(Product::subtotal).sum()
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|p| u64::from(p.amount)).sum()
    }
}

impl TryFrom<Vec<Product>> for Cart {
    type Error = CartIntegrityError;

    fn try_from(products: Vec<Product>) -> Result<Self, Self::Error> {
        let mut cart = Cart::new();
        for product in products {
            cart.push_new(product)?;
        }
        Ok(cart)
    }
}

impl From<Cart> for Vec<Product> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(id: i64, amount: u32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {}", id),
            price: 10.0,
            image: format!("https://cdn.example.com/{}.jpg", id),
            amount,
        }
    }

    fn cart_of(products: Vec<Product>) -> Cart {
        Cart::try_from(products).unwrap()
    }

    #[test]
    fn should_reject_duplicated_product() {
        let mut cart = cart_of(vec![product(1, 1)]);

        let result = cart.push_new(product(1, 1));

        assert!(matches!(
            result,
            Err(CartIntegrityError::DuplicateProduct(id)) if id == ProductId::new(1)
        ));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn should_reject_line_with_zero_amount() {
        let mut cart = Cart::new();

        let result = cart.push_new(product(3, 0));

        assert!(matches!(result, Err(CartIntegrityError::EmptyAmount(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn should_increment_only_matching_line() {
        let mut cart = cart_of(vec![product(1, 1), product(2, 4)]);

        let amount = cart.increment(ProductId::new(2));

        assert_eq!(amount, Some(5));
        assert_eq!(cart.find(ProductId::new(1)).unwrap().amount, 1);
    }

    #[test]
    fn should_not_increment_absent_product() {
        let mut cart = cart_of(vec![product(1, 1)]);

        assert_eq!(cart.increment(ProductId::new(9)), None);
    }

    #[test]
    fn should_report_absent_product_on_set_amount() {
        let mut cart = cart_of(vec![product(1, 1)]);

        let updated = cart.set_amount(ProductId::new(2), 3).unwrap();

        assert!(!updated);
        assert_eq!(cart, cart_of(vec![product(1, 1)]));
    }

    #[test]
    fn should_preserve_order_when_removing() {
        let mut cart = cart_of(vec![product(1, 1), product(2, 1), product(3, 1)]);

        let removed = cart.remove(ProductId::new(2));

        assert_eq!(removed.map(|p| p.id), Some(ProductId::new(2)));
        let ids: Vec<i64> = cart.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn should_compute_total_and_item_count() {
        let mut shoe = product(5, 2);
        shoe.price = 100.0;
        let mut sock = product(6, 3);
        sock.price = 7.5;
        let cart = cart_of(vec![shoe, sock]);

        assert_eq!(cart.total(), 222.5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn should_serialize_as_array_with_storefront_field_names() {
        let cart = cart_of(vec![product(1, 2)]);

        let json: serde_json::Value = serde_json::to_value(&cart).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{
                "id": 1,
                "title": "Product 1",
                "price": 10.0,
                "image": "https://cdn.example.com/1.jpg",
                "amount": 2
            }])
        );
    }

    #[test]
    fn should_refuse_to_deserialize_duplicated_ids() {
        let raw = r#"[
            {"id":1,"title":"A","price":1.0,"image":"a.jpg","amount":1},
            {"id":1,"title":"A","price":1.0,"image":"a.jpg","amount":2}
        ]"#;

        let result = serde_json::from_str::<Cart>(raw);

        assert!(result.is_err());
    }

    #[test]
    fn should_build_single_unit_line_from_catalog_product() {
        let catalog = CatalogProduct {
            id: ProductId::new(5),
            title: "Shoe".to_string(),
            price: 100.0,
            image: "shoe.jpg".to_string(),
        };

        let line = catalog.into_cart_product();

        assert_eq!(line.amount, 1);
        assert_eq!(line.title, "Shoe");
    }

    proptest! {
        #[test]
        fn should_restore_equal_cart_from_its_json(
            amounts in proptest::collection::vec(1u32..50, 0..8)
        ) {
            let products: Vec<Product> = amounts
                .iter()
                .enumerate()
                .map(|(i, amount)| product(i as i64, *amount))
                .collect();
            let cart = cart_of(products);

            let restored: Cart =
                serde_json::from_str(&serde_json::to_string(&cart).unwrap()).unwrap();

            prop_assert_eq!(restored, cart);
        }

        #[test]
        fn should_keep_ids_unique_under_any_push_sequence(
            ids in proptest::collection::vec(0i64..5, 0..20)
        ) {
            let mut cart = Cart::new();
            for id in &ids {
                let _ = cart.push_new(product(*id, 1));
            }

            let mut seen: Vec<i64> = cart.iter().map(|p| p.id.value()).collect();
            let len = seen.len();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), len);
        }
    }
}
