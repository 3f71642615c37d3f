//! Data supplier port
//!
//! Defines the interface for retrieving the three store collections
//! (users, carts, products) from an external source: the store HTTP API,
//! a JSON snapshot on disk, or in-memory fixtures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::result::{FetchError, Result};
use crate::domain::{Cart, Product, User};

/// The decoded collections a report is computed from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub users: Vec<User>,
    pub carts: Vec<Cart>,
    pub products: Vec<Product>,
}

impl Dataset {
    pub fn new(users: Vec<User>, carts: Vec<Cart>, products: Vec<Product>) -> Self {
        Self {
            users,
            carts,
            products,
        }
    }

    /// Check every record against the boundary rules: coordinates in range,
    /// prices not negative, quantities positive
    pub fn validate(&self) -> std::result::Result<(), FetchError> {
        self.users.iter().try_for_each(User::validate)?;
        self.products.iter().try_for_each(Product::validate)?;
        self.carts.iter().try_for_each(Cart::validate)
    }
}

/// Data supplier trait
///
/// Implementations return all three collections or fail as a whole with
/// `Error::Fetch`. There is no partial result.
#[async_trait]
pub trait DataSupplier: Send + Sync {
    /// Supplier name (e.g., "fakestore", "file")
    fn name(&self) -> &str;

    /// Fetch users, carts and products
    async fn fetch_all(&self) -> Result<Dataset>;
}
