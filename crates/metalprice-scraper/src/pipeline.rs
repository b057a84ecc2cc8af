//! Per-vendor pipeline: fetch, extract, filter, correct.
//!
//! Vendors run strictly one after another and every vendor yields exactly
//! one [`CompanyPriceRecord`]. A vendor whose pages cannot be fetched turns
//! into an error record; it never aborts the run.

use chrono::Utc;
use metalprice_core::{CompanyNames, CompanyPriceRecord, CorrectionsFile, PriceMap, SiteConfig};

use crate::aggregate::RunSummary;
use crate::correct::apply_correction;
use crate::error::ScraperError;
use crate::extract::StrategyRegistry;
use crate::fetch::Fetcher;
use crate::filter::TargetItemMatcher;

/// A page that could not be fetched.
#[derive(Debug)]
pub struct UrlFailure {
    pub url: String,
    pub error: ScraperError,
}

/// Raw result of scraping every URL of one vendor.
#[derive(Debug, Default)]
pub struct SiteScrape {
    /// Entries merged across URLs; later URLs overwrite earlier ones.
    pub prices: PriceMap,
    pub failures: Vec<UrlFailure>,
    pub attempted: usize,
}

impl SiteScrape {
    /// `true` when at least one URL was tried and none succeeded.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.failures.len() == self.attempted
    }

    /// Error text for the vendor record, present only when every URL failed.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        if !self.all_failed() {
            return None;
        }
        let details: Vec<String> = self
            .failures
            .iter()
            .map(|f| format!("{}: {}", f.url, f.error))
            .collect();
        Some(format!(
            "all {} URLs failed: {}",
            self.attempted,
            details.join("; ")
        ))
    }
}

pub struct Pipeline {
    fetcher: Fetcher,
    registry: StrategyRegistry,
    matcher: TargetItemMatcher,
    corrections: CorrectionsFile,
    companies: CompanyNames,
    filter_items: bool,
}

impl Pipeline {
    /// Builds a pipeline with target-item filtering enabled.
    #[must_use]
    pub fn new(
        fetcher: Fetcher,
        registry: StrategyRegistry,
        matcher: TargetItemMatcher,
        corrections: CorrectionsFile,
        companies: CompanyNames,
    ) -> Self {
        Self {
            fetcher,
            registry,
            matcher,
            corrections,
            companies,
            filter_items: true,
        }
    }

    /// Enables or disables the target-item filter.
    #[must_use]
    pub fn with_filter(mut self, enabled: bool) -> Self {
        self.filter_items = enabled;
        self
    }

    #[must_use]
    pub fn matcher(&self) -> &TargetItemMatcher {
        &self.matcher
    }

    #[must_use]
    pub fn companies(&self) -> &CompanyNames {
        &self.companies
    }

    /// Fetches and extracts every URL of `site` in order.
    ///
    /// Per-URL failures are collected, not returned.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::NoUrls`] if `site` has no URLs at all.
    pub async fn scrape(&self, site: &SiteConfig) -> Result<SiteScrape, ScraperError> {
        if site.urls.is_empty() {
            return Err(ScraperError::NoUrls {
                site: site.name.clone(),
            });
        }

        let mut scrape = SiteScrape {
            attempted: site.urls.len(),
            ..SiteScrape::default()
        };
        for url in &site.urls {
            match self.fetcher.fetch(url).await {
                Ok(body) => {
                    let page = self.registry.extract_html(&body, site);
                    tracing::debug!(site = %site.name, url, count = page.len(), "page extracted");
                    scrape.prices.extend(page);
                }
                Err(error) => {
                    tracing::warn!(site = %site.name, url, error = %error, "fetch failed");
                    scrape.failures.push(UrlFailure {
                        url: url.clone(),
                        error,
                    });
                }
            }
        }
        Ok(scrape)
    }

    /// Runs the full pipeline for one vendor.
    ///
    /// The vendor's correction is applied even when every fetch failed, so
    /// operator-supplied prices still reach the output.
    pub async fn run_site(&self, site: &SiteConfig) -> CompanyPriceRecord {
        let scraped_at = Utc::now();
        let company_name = self.companies.normalize(&site.name);

        let (raw, error) = match self.scrape(site).await {
            Ok(scrape) => {
                let error = scrape.error_message();
                (scrape.prices, error)
            }
            Err(e) => (PriceMap::new(), Some(e.to_string())),
        };
        if let Some(error) = &error {
            tracing::error!(site = %site.name, error = %error, "site failed");
        }

        let mut prices = if self.filter_items {
            let filtered = self.matcher.filter(&raw);
            tracing::debug!(
                site = %site.name,
                raw = raw.len(),
                count = filtered.len(),
                "filtered to target items"
            );
            filtered
        } else {
            raw
        };

        if let Some((key, correction)) = self
            .corrections
            .find(&company_name)
            .filter(|(_, correction)| !correction.is_empty())
        {
            tracing::info!(site = %site.name, correction = key, "applying price correction");
            prices = apply_correction(prices, correction);
        }

        tracing::info!(site = %site.name, company = %company_name, count = prices.len(), "site done");
        CompanyPriceRecord {
            company_name,
            region: site.region.clone(),
            source_urls: site.urls.clone(),
            scraped_at,
            prices,
            error,
        }
    }

    /// Runs every site in order and returns one record per site.
    pub async fn run(&self, sites: &[SiteConfig]) -> Vec<CompanyPriceRecord> {
        let mut records = Vec::with_capacity(sites.len());
        for site in sites {
            records.push(self.run_site(site).await);
        }

        let summary = RunSummary::from_records(&records);
        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            total_prices = summary.total_prices,
            "run complete"
        );
        records
    }
}
