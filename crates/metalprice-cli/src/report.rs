//! `report`: scrape without filtering or corrections and show where each
//! observed material name lands.

use metalprice_core::AppConfig;
use metalprice_scraper::MappingReport;

use crate::context::RunContext;

pub(crate) async fn run_report(
    config: &AppConfig,
    site_filter: Option<&str>,
) -> anyhow::Result<()> {
    let ctx = RunContext::load(config)?;
    let sites = ctx.select_sites(site_filter)?;
    let pipeline = ctx.pipeline(config, false)?;

    let mut report = MappingReport::new();
    for site in &sites {
        let company = pipeline.companies().normalize(&site.name);
        match pipeline.scrape(site).await {
            Ok(scrape) => {
                if let Some(error) = scrape.error_message() {
                    eprintln!("error: {company}: {error}");
                }
                report.add_company(&company, &scrape.prices, pipeline.matcher());
            }
            Err(e) => eprintln!("error: {company}: {e}"),
        }
    }

    print!("{report}");
    Ok(())
}
