//! Store statistics core
//!
//! Computes a one-shot report over a store's users, carts and products:
//! product value per category, the most valuable cart and its owner, and the
//! two users living furthest apart.
//!
//! - **domain**: Core records (User, Product, Cart) and the distance function
//! - **ports**: Trait definitions for external dependencies (DataSupplier)
//! - **services**: Aggregations and report orchestration
//! - **adapters**: Concrete suppliers (store HTTP API, snapshots, fixtures)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::sync::Arc;

use adapters::fakestore::FakeStoreClient;
use config::Config;

// Re-export commonly used types at crate root
pub use domain::result::{Error, FetchError, LookupError, Result};
pub use domain::{Cart, CartItem, GeoPoint, Product, User, UserName};
pub use ports::{DataSupplier, Dataset};
pub use services::{build_report, Report, ReportService};

/// Create a report service reading from the configured store API
pub fn http_report_service(config: &Config) -> Result<ReportService> {
    let client = FakeStoreClient::new(config)?;
    Ok(ReportService::new(Arc::new(client)))
}
