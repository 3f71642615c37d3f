//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The report
//! services depend only on these traits, not on concrete implementations.

mod data_supplier;

pub use data_supplier::{DataSupplier, Dataset};
