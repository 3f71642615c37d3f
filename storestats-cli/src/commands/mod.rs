//! CLI command implementations

pub mod fetch;
pub mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use storestats_core::config::Config;
use storestats_core::{http_report_service, ReportService};

/// Options selecting and configuring the store API
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Store API base URL (overrides settings and STORESTATS_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,
    /// JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Resolve configuration: defaults, settings file, environment, then flags
pub fn load_config(source: &SourceArgs) -> Result<Config> {
    let mut config =
        Config::load(source.config.as_deref()).context("Failed to load configuration")?;

    if let Some(base_url) = &source.base_url {
        config = config.with_base_url(base_url);
        config.validate().context("Invalid --base-url")?;
    }

    Ok(config)
}

/// Report service talking to the store API
pub fn get_http_service(source: &SourceArgs) -> Result<ReportService> {
    let config = load_config(source)?;
    http_report_service(&config).context("Failed to create store API client")
}
