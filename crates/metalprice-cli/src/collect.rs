//! `collect`: run the pipeline over every selected vendor and write the
//! results as JSON.
//!
//! Vendor failures end up in the records; only configuration and output
//! errors stop the command.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use metalprice_core::AppConfig;
use metalprice_scraper::{PriceMatrix, RunSummary};

use crate::context::RunContext;

#[derive(Debug, Clone)]
pub(crate) struct CollectOptions {
    pub site_filter: Option<String>,
    pub filter_items: bool,
    pub output_dir: PathBuf,
    pub dry_run: bool,
}

pub(crate) async fn run_collect(
    config: &AppConfig,
    options: &CollectOptions,
) -> anyhow::Result<()> {
    let ctx = RunContext::load(config)?;
    let sites = ctx.select_sites(options.site_filter.as_deref())?;

    if options.dry_run {
        let names: Vec<&str> = sites.iter().map(|s| s.name.as_str()).collect();
        println!(
            "dry-run: would collect prices for {} sites: [{}]",
            sites.len(),
            names.join(", ")
        );
        return Ok(());
    }

    let pipeline = ctx.pipeline(config, options.filter_items)?;
    tracing::info!(sites = sites.len(), filter = options.filter_items, "starting collection");
    let records = pipeline.run(&sites).await;

    let matrix = PriceMatrix::from_records(&records, ctx.target_items.names());
    let stamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();

    std::fs::create_dir_all(&options.output_dir).with_context(|| {
        format!("failed to create output directory {}", options.output_dir.display())
    })?;
    let records_path = options.output_dir.join(format!("records_{stamp}.json"));
    let matrix_path = options.output_dir.join(format!("matrix_{stamp}.json"));
    write_json(&records_path, &records)?;
    write_json(&matrix_path, &matrix)?;

    let summary = RunSummary::from_records(&records);
    println!("{}", format_summary(&summary));
    for record in records.iter().filter(|r| r.error.is_some()) {
        println!(
            "  failed: {} ({})",
            record.company_name,
            record.error.as_deref().unwrap_or_default()
        );
    }
    println!("records: {}", records_path.display());
    println!("matrix:  {}", matrix_path.display());
    Ok(())
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote output");
    Ok(())
}

fn format_summary(summary: &RunSummary) -> String {
    format!(
        "collect complete: {} succeeded, {} failed, {} prices",
        summary.succeeded, summary.failed, summary.total_prices
    )
}
