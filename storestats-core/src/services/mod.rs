//! Service layer
//!
//! `stats` holds the pure aggregations; `report` composes them and drives
//! the data supplier.

pub mod report;
pub mod stats;

pub use report::{build_report, Report, ReportService};
pub use stats::{CartWinner, CategoryTotals, DistantPair, NameLookup, PriceLookup};
