//! Shopping cart domain model

use serde::{Deserialize, Serialize};

use super::result::FetchError;

/// A user's cart with its ordered line items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: u64,
    pub user_id: u64,
    pub items: Vec<CartItem>,
}

/// One line of a cart: a product reference and a positive quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: u64,
    pub quantity: u32,
}

impl Cart {
    pub fn new(id: u64, user_id: u64, items: Vec<CartItem>) -> Self {
        Self { id, user_id, items }
    }

    /// Reject line items with a zero quantity
    pub fn validate(&self) -> Result<(), FetchError> {
        match self.items.iter().find(|item| item.quantity == 0) {
            Some(item) => Err(FetchError::malformed(
                "carts",
                format!(
                    "cart {} has invalid quantity 0 for product {}",
                    self.id, item.product_id
                ),
            )),
            None => Ok(()),
        }
    }
}

impl CartItem {
    pub fn new(product_id: u64, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}
