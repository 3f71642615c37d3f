//! Adapter implementations
//!
//! Adapters implement the `DataSupplier` port with concrete sources:
//! - Store HTTP API client (fakestoreapi-compatible)
//! - In-memory datasets and JSON snapshots for offline runs

pub mod fakestore;
pub mod fixture;

#[cfg(test)]
pub mod fakestore_mock;
