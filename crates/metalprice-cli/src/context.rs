//! Loads the configuration artifacts shared by every sub-command.

use anyhow::Context;
use metalprice_core::{
    load_company_aliases, load_corrections, load_sites, load_target_items, AppConfig,
    CompanyNames, CorrectionsFile, SiteConfig, TargetItemsFile,
};
use metalprice_scraper::{Fetcher, Pipeline, StrategyRegistry, TargetItemMatcher};

/// Every config file for one run, loaded up front. A missing or malformed
/// file aborts the command before any page is fetched.
pub(crate) struct RunContext {
    pub sites: Vec<SiteConfig>,
    pub target_items: TargetItemsFile,
    pub corrections: CorrectionsFile,
    pub companies: CompanyNames,
}

impl RunContext {
    pub(crate) fn load(config: &AppConfig) -> anyhow::Result<Self> {
        let sites = load_sites(&config.sites_path)
            .with_context(|| format!("failed to load {}", config.sites_path.display()))?;
        let target_items = load_target_items(&config.target_items_path)
            .with_context(|| format!("failed to load {}", config.target_items_path.display()))?;
        let corrections = load_corrections(&config.corrections_path)
            .with_context(|| format!("failed to load {}", config.corrections_path.display()))?;
        let aliases = load_company_aliases(&config.company_aliases_path).with_context(|| {
            format!("failed to load {}", config.company_aliases_path.display())
        })?;

        tracing::debug!(
            sites = sites.sites.len(),
            target_items = target_items.target_items.len(),
            corrections = corrections.corrections.len(),
            "configuration loaded"
        );
        Ok(Self {
            sites: sites.sites,
            target_items,
            corrections,
            companies: CompanyNames::new(&aliases),
        })
    }

    /// Sites whose name contains `filter`, or all sites when `filter` is
    /// `None`. A filter that matches nothing is an error.
    pub(crate) fn select_sites(&self, filter: Option<&str>) -> anyhow::Result<Vec<SiteConfig>> {
        let Some(filter) = filter else {
            return Ok(self.sites.clone());
        };
        let selected: Vec<SiteConfig> = self
            .sites
            .iter()
            .filter(|site| site.name.contains(filter))
            .cloned()
            .collect();
        if selected.is_empty() {
            anyhow::bail!("no site name contains '{filter}'");
        }
        Ok(selected)
    }

    pub(crate) fn pipeline(
        &self,
        config: &AppConfig,
        filter_items: bool,
    ) -> anyhow::Result<Pipeline> {
        let fetcher = Fetcher::from_config(config).context("failed to build HTTP fetcher")?;
        Ok(Pipeline::new(
            fetcher,
            StrategyRegistry::with_builtin(),
            TargetItemMatcher::new(&self.target_items.target_items),
            self.corrections.clone(),
            self.companies.clone(),
        )
        .with_filter(filter_items))
    }
}
