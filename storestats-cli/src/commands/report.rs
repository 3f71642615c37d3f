//! Report command - fetch the store data and print the three answers

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use storestats_core::adapters::fixture::FileSupplier;
use storestats_core::{Report, ReportService};

use super::{get_http_service, SourceArgs};
use crate::output;

pub async fn run(json: bool, from_file: Option<PathBuf>, source: &SourceArgs) -> Result<()> {
    let service = match from_file {
        Some(path) => ReportService::new(Arc::new(FileSupplier::new(path))),
        None => get_http_service(source)?,
    };

    let report = service
        .generate()
        .await
        .with_context(|| format!("Report failed (source: {})", service.supplier_name()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &Report) {
    println!(
        "{}",
        "Product categories and total value of products of a given category".bold()
    );
    if report.category_totals.is_empty() {
        output::warning("No products found.");
    } else {
        let mut table = output::create_table();
        table.set_header(vec!["Category", "Total value"]);
        for (category, total) in &report.category_totals {
            table.add_row(vec![category.clone(), output::format_money(*total)]);
        }
        println!("{}", table);
    }
    println!();

    println!("{}", "Cart with the highest value and its owner".bold());
    match &report.highest_value_cart {
        Some(winner) => println!(
            "  {} owns cart {} worth {}",
            winner.owner_name.cyan(),
            winner.cart_id,
            output::format_money(winner.value).green()
        ),
        None => output::warning("  No carts found."),
    }
    println!();

    println!("{}", "Two users living the furthest away from each other".bold());
    match &report.most_distant_users {
        Some(pair) => println!(
            "  {} and {} with a distance of {}",
            pair.first.name.display_name().cyan(),
            pair.second.name.display_name().cyan(),
            output::format_distance(pair.distance_meters)
        ),
        None => output::warning("  Fewer than two users found."),
    }
}
