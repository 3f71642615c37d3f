//! Product domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::FetchError;

/// A catalog entry with its category and unit price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub category: String,
    /// Unit price, never negative
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Product {
    pub fn new(id: u64, category: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            category: category.into(),
            price,
            title: None,
        }
    }

    /// Reject a negative price
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(FetchError::malformed(
                "products",
                format!("product {} has a negative price", self.id),
            ));
        }
        Ok(())
    }
}
