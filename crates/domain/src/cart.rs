use thiserror::Error;

use crate::product::Product;
use crate::sale::{SaleItem, SaleRequest};

/// One product-and-quantity entry in the sale in progress.
///
/// The product is a snapshot from the catalog at the time the line was
/// created; stock checks validate against that snapshot, not a live
/// fetch. The backend remains the final authority at submission time.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}

/// In-memory cart for the active session. Lines keep insertion order
/// and there is at most one line per product id.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Add one unit of a product. An existing line is incremented, a
    /// new line starts at quantity 1. Fails without mutating when the
    /// increment would exceed the snapshot's stock.
    pub fn add_product(&mut self, product: &Product) -> Result<(), CartError> {
        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => {
                if line.quantity >= product.stock {
                    return Err(CartError::InsufficientStock {
                        product_id: product.id,
                        available: product.stock,
                    });
                }
                line.quantity += 1;
            }
            None => {
                if product.stock == 0 {
                    return Err(CartError::InsufficientStock {
                        product_id: product.id,
                        available: 0,
                    });
                }
                self.lines.push(CartLine {
                    product: product.clone(),
                    quantity: 1,
                });
            }
        }

        Ok(())
    }

    /// Set a line's quantity. Zero removes the line; a quantity above
    /// the snapshot's stock fails and leaves the line unchanged.
    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> Result<(), CartError> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange(index))?;

        if quantity == 0 {
            self.lines.remove(index);
            return Ok(());
        }

        if quantity > line.product.stock {
            return Err(CartError::InsufficientStock {
                product_id: line.product.id,
                available: line.product.stock,
            });
        }

        line.quantity = quantity;
        Ok(())
    }

    /// Adjust a line's quantity by a signed delta (the ± buttons on
    /// the sale screen). A result at or below zero removes the line.
    pub fn change_quantity(&mut self, index: usize, delta: i32) -> Result<(), CartError> {
        let line = self
            .lines
            .get(index)
            .ok_or(CartError::IndexOutOfRange(index))?;

        let new_quantity = line.quantity as i64 + delta as i64;
        self.set_quantity(index, new_quantity.max(0) as u32)
    }

    /// Remove a line unconditionally.
    pub fn remove_line(&mut self, index: usize) -> Result<(), CartError> {
        if index >= self.lines.len() {
            return Err(CartError::IndexOutOfRange(index));
        }
        self.lines.remove(index);
        Ok(())
    }

    /// Empty the cart. Never fails.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Grand total, recomputed from the current lines on every call.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(|l| l.subtotal()).sum()
    }

    /// Snapshot the current lines into a sale request. Later cart
    /// mutations do not affect a request that was already built.
    pub fn to_sale_request(
        &self,
        client_id: Option<i64>,
        delivery_type: crate::sale::DeliveryType,
    ) -> SaleRequest {
        SaleRequest {
            client_id,
            delivery_type,
            items: self
                .lines
                .iter()
                .map(|l| SaleItem {
                    product_id: l.product.id,
                    quantity: l.quantity,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    #[error("Insufficient stock for product {product_id} (available: {available})")]
    InsufficientStock { product_id: i64, available: u32 },

    #[error("No cart line at index {0}")]
    IndexOutOfRange(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Category;
    use crate::sale::DeliveryType;

    fn product(id: i64, price: f64, stock: u32) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            category: Category::Bread,
            price,
            stock,
            description: None,
            active: true,
        }
    }

    #[test]
    fn test_add_product_creates_line_with_quantity_one() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 2.5, 5)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_add_product_twice_increments_single_line() {
        let mut cart = Cart::new();
        let p = product(1, 2.5, 5);

        cart.add_product(&p).unwrap();
        cart.add_product(&p).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_product_out_of_stock_fails_without_mutation() {
        let mut cart = Cart::new();
        let result = cart.add_product(&product(1, 2.5, 0));

        assert_eq!(
            result,
            Err(CartError::InsufficientStock {
                product_id: 1,
                available: 0
            })
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_product_at_stock_limit_fails_without_mutation() {
        let mut cart = Cart::new();
        let p = product(1, 2.5, 2);

        cart.add_product(&p).unwrap();
        cart.add_product(&p).unwrap();
        let result = cart.add_product(&p);

        assert!(matches!(result, Err(CartError::InsufficientStock { .. })));
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_set_quantity_updates_line() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 2.5, 5)).unwrap();

        cart.set_quantity(0, 4).unwrap();
        assert_eq!(cart.lines()[0].quantity, 4);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 2.5, 5)).unwrap();

        cart.set_quantity(0, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_above_stock_leaves_line_unchanged() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 2.5, 5)).unwrap();
        cart.set_quantity(0, 3).unwrap();

        let result = cart.set_quantity(0, 10);

        assert_eq!(
            result,
            Err(CartError::InsufficientStock {
                product_id: 1,
                available: 5
            })
        );
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_set_quantity_bad_index_fails() {
        let mut cart = Cart::new();
        assert_eq!(cart.set_quantity(0, 1), Err(CartError::IndexOutOfRange(0)));
    }

    #[test]
    fn test_change_quantity_decrement_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 2.5, 5)).unwrap();

        cart.change_quantity(0, -1).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_increment_respects_stock() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 2.5, 1)).unwrap();

        let result = cart.change_quantity(0, 1);
        assert!(matches!(result, Err(CartError::InsufficientStock { .. })));
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_remove_line() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 2.5, 5)).unwrap();
        cart.add_product(&product(2, 1.0, 5)).unwrap();

        cart.remove_line(0).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].product.id, 2);
    }

    #[test]
    fn test_remove_line_bad_index_fails() {
        let mut cart = Cart::new();
        assert_eq!(cart.remove_line(3), Err(CartError::IndexOutOfRange(3)));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 2.5, 5)).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn test_total_matches_sum_of_subtotals() {
        let mut cart = Cart::new();
        let p1 = product(1, 2.5, 5);
        let p2 = product(2, 1.0, 2);

        cart.add_product(&p1).unwrap();
        cart.set_quantity(0, 3).unwrap();
        cart.add_product(&p2).unwrap();
        cart.add_product(&p2).unwrap();

        assert_eq!(cart.total(), 9.5);
        assert_eq!(
            cart.total(),
            cart.lines().iter().map(|l| l.subtotal()).sum::<f64>()
        );
    }

    #[test]
    fn test_total_never_drifts_across_mutations() {
        let mut cart = Cart::new();
        let p1 = product(1, 3.25, 10);
        let p2 = product(2, 0.75, 10);

        for _ in 0..4 {
            cart.add_product(&p1).unwrap();
        }
        cart.add_product(&p2).unwrap();
        cart.set_quantity(1, 6).unwrap();
        cart.remove_line(0).unwrap();

        let expected: f64 = cart.lines().iter().map(|l| l.subtotal()).sum();
        assert_eq!(cart.total(), expected);
    }

    #[test]
    fn test_to_sale_request_snapshots_lines_in_order() {
        let mut cart = Cart::new();
        cart.add_product(&product(5, 2.0, 5)).unwrap();
        cart.add_product(&product(3, 1.0, 5)).unwrap();
        cart.set_quantity(0, 2).unwrap();

        let request = cart.to_sale_request(Some(9), DeliveryType::Pickup);

        assert_eq!(request.client_id, Some(9));
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[0].product_id, 5);
        assert_eq!(request.items[0].quantity, 2);
        assert_eq!(request.items[1].product_id, 3);

        // Mutations after the snapshot do not affect the request
        cart.clear();
        assert_eq!(request.items.len(), 2);
    }
}
