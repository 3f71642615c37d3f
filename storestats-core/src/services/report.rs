//! Report service - composes the aggregations into the final answers

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::Result;
use crate::ports::{DataSupplier, Dataset};
use crate::services::stats::{self, CartWinner, CategoryTotals, DistantPair};

/// The three answers produced by one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub category_totals: CategoryTotals,
    pub highest_value_cart: Option<CartWinner>,
    pub most_distant_users: Option<DistantPair>,
}

/// Build a report from already-fetched collections
///
/// Fails with `Error::Lookup` when a cart references an unknown product or
/// the winning cart's owner is unknown, and with `Error::Overflow` when a sum
/// leaves the decimal range. No partial report is returned.
pub fn build_report(dataset: &Dataset) -> Result<Report> {
    let category_totals = stats::category_totals(&dataset.products)?;
    let prices = stats::price_lookup(&dataset.products);
    let names = stats::name_lookup(&dataset.users);

    let highest_value_cart = stats::highest_value_cart(&dataset.carts, &prices, &names)?;
    let most_distant_users = stats::most_distant_users(&dataset.users);

    Ok(Report {
        category_totals,
        highest_value_cart,
        most_distant_users,
    })
}

/// Report service: fetch everything, then compute
pub struct ReportService {
    supplier: Arc<dyn DataSupplier>,
}

impl ReportService {
    pub fn new(supplier: Arc<dyn DataSupplier>) -> Self {
        Self { supplier }
    }

    /// Name of the underlying data supplier
    pub fn supplier_name(&self) -> &str {
        self.supplier.name()
    }

    /// Fetch the dataset without computing anything
    pub async fn fetch(&self) -> Result<Dataset> {
        tracing::debug!(supplier = self.supplier.name(), "fetching dataset");
        let dataset = self.supplier.fetch_all().await?;
        tracing::info!(
            supplier = self.supplier.name(),
            users = dataset.users.len(),
            carts = dataset.carts.len(),
            products = dataset.products.len(),
            "dataset fetched"
        );
        Ok(dataset)
    }

    /// Fetch the dataset and build the report
    pub async fn generate(&self) -> Result<Report> {
        let dataset = self.fetch().await?;
        let report = build_report(&dataset)?;

        if let Some(winner) = &report.highest_value_cart {
            tracing::debug!(
                cart_id = winner.cart_id,
                value = %winner.value,
                "highest value cart"
            );
        }
        if let Some(pair) = &report.most_distant_users {
            tracing::debug!(
                first = pair.first.id,
                second = pair.second.id,
                distance_meters = pair.distance_meters,
                "most distant users"
            );
        }

        Ok(report)
    }
}
