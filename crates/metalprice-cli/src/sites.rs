//! `sites`: list configured vendors and how each one will be scraped.

use metalprice_core::{AppConfig, SiteConfig};
use metalprice_scraper::StrategyRegistry;

use crate::context::RunContext;

pub(crate) fn run_sites(config: &AppConfig) -> anyhow::Result<()> {
    let ctx = RunContext::load(config)?;
    let registry = StrategyRegistry::with_builtin();

    for site in &ctx.sites {
        let correction = ctx.corrections.find(&ctx.companies.normalize(&site.name));
        println!("{}", site_line(site, &registry, correction.map(|(key, _)| key)));
    }
    println!("{} sites", ctx.sites.len());
    Ok(())
}

fn site_line(site: &SiteConfig, registry: &StrategyRegistry, correction: Option<&str>) -> String {
    let region = if site.region.is_empty() {
        "-"
    } else {
        site.region.as_str()
    };
    format!(
        "{}\t{}\t{}\t{} url(s)\tcorrection: {}",
        site.name,
        region,
        registry.effective_id(site),
        site.urls.len(),
        correction.unwrap_or("-")
    )
}
