use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Material label to verbatim price text, in extraction order.
pub type PriceMap = IndexMap<String, String>;

/// The outcome of scraping one vendor.
///
/// A record with `error` set may still carry prices injected by the
/// vendor's `add` corrections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyPriceRecord {
    pub company_name: String,
    pub region: String,
    pub source_urls: Vec<String>,
    pub scraped_at: DateTime<Utc>,
    pub prices: PriceMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompanyPriceRecord {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    #[must_use]
    pub fn price_count(&self) -> usize {
        self.prices.len()
    }
}
