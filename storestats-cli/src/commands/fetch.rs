//! Fetch command - save the store data as a snapshot for offline reports

use std::path::Path;

use anyhow::{Context, Result};
use storestats_core::adapters::fixture::save_snapshot;

use super::{get_http_service, SourceArgs};
use crate::output;

pub async fn run(path: &Path, source: &SourceArgs) -> Result<()> {
    let service = get_http_service(source)?;
    let dataset = service.fetch().await.context("Failed to fetch store data")?;

    tracing::debug!(path = %path.display(), "writing snapshot");
    save_snapshot(path, &dataset)
        .with_context(|| format!("Failed to write snapshot: {:?}", path))?;

    output::success(&format!(
        "Saved {} users, {} carts and {} products to {}",
        dataset.users.len(),
        dataset.carts.len(),
        dataset.products.len(),
        path.display()
    ));
    Ok(())
}
