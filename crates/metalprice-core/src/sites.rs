use std::borrow::Cow;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Category 1: table-first vendor pages.
pub const CATEGORY_TABLE: u8 = 1;
/// Category 2: list/div vendor pages, auto extraction by default.
pub const CATEGORY_LIST: u8 = 2;

/// Static configuration for one vendor site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSiteConfig")]
pub struct SiteConfig {
    /// Display name. May differ in spelling from the correction and alias
    /// files; see [`crate::CompanyNames`].
    pub name: String,
    /// Price pages, fetched in order. Later pages overwrite earlier ones on
    /// material-name collision.
    pub urls: Vec<String>,
    pub category: u8,
    pub extractor_type: Option<String>,
    pub region: String,
    pub hints: SelectorHints,
}

/// Free-form selector hints consumed only by specific strategies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorHints {
    #[serde(default)]
    pub table_selectors: Vec<String>,
    #[serde(default)]
    pub container_selector: Option<String>,
    #[serde(default)]
    pub item_selector: Option<String>,
    #[serde(default)]
    pub text_selector: Option<String>,
    #[serde(default)]
    pub box_class: Option<String>,
    /// Class of the marked-value spans read by `auto` (default `MP-value`).
    #[serde(default)]
    pub value_class: Option<String>,
    #[serde(default)]
    pub include_category: bool,
}

/// On-disk shape: accepts the legacy single-URL keys next to `urls`.
#[derive(Deserialize)]
struct RawSiteConfig {
    name: String,
    #[serde(default)]
    urls: Vec<String>,
    #[serde(default)]
    price_urls: Vec<String>,
    #[serde(default)]
    price_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    category: Option<u8>,
    #[serde(default)]
    extractor_type: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(flatten)]
    hints: SelectorHints,
}

impl From<RawSiteConfig> for SiteConfig {
    fn from(raw: RawSiteConfig) -> Self {
        let mut urls = raw.urls;
        urls.extend(raw.price_urls);
        if urls.is_empty() {
            // A page URL wins over the vendor homepage.
            if let Some(single) = raw.price_url.or(raw.url) {
                urls.push(single);
            }
        }
        urls.retain(|u| !u.trim().is_empty());

        Self {
            name: raw.name,
            urls,
            category: raw.category.unwrap_or(CATEGORY_LIST),
            extractor_type: raw.extractor_type.filter(|t| !t.trim().is_empty()),
            region: raw.region.unwrap_or_default(),
            hints: raw.hints,
        }
    }
}

impl SiteConfig {
    /// Registry key of the extraction strategy for this site.
    ///
    /// The legacy id `div_list` names a different DOM shape in each category.
    #[must_use]
    pub fn strategy_id(&self) -> Cow<'_, str> {
        match (self.category, self.extractor_type.as_deref()) {
            (CATEGORY_TABLE, Some("div_list")) => Cow::Borrowed("card_list"),
            (_, Some("div_list")) => Cow::Borrowed("item_box"),
            (_, Some(other)) => Cow::Borrowed(other),
            (CATEGORY_TABLE, None) => Cow::Borrowed("table"),
            (_, None) => Cow::Borrowed("auto"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitesFile {
    pub sites: Vec<SiteConfig>,
}

/// Load and validate the site registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sites(path: &Path) -> Result<SitesFile, ConfigError> {
    let sites_file: SitesFile = crate::read_yaml(path)?;
    validate_sites(&sites_file)?;
    Ok(sites_file)
}

fn validate_sites(sites_file: &SitesFile) -> Result<(), ConfigError> {
    for site in &sites_file.sites {
        if site.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site name must be non-empty".to_string(),
            ));
        }
        if site.urls.is_empty() {
            return Err(ConfigError::Validation(format!(
                "site '{}' has no URL; set `urls` or `price_url`",
                site.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "sites_test.rs"]
mod tests;
