//! Extraction strategy set.
//!
//! Each strategy turns one parsed vendor page into a raw price map
//! (observed material name to price text). Strategies are stored in a
//! [`StrategyRegistry`] keyed by the id a site's configuration resolves to;
//! adding a vendor layout means registering one more function.
//!
//! A strategy that finds nothing returns an empty map. Only the `auto`
//! strategy falls back internally; named vendor strategies never fall back
//! to one another (the `table` strategy bundles its own card-list fallback).

mod dom;
mod formats;

use std::collections::HashMap;

use metalprice_core::{PriceMap, SiteConfig};
use scraper::Html;

pub use formats::auto::{extract_auto, extract_auto_with_stage, AutoStage, DEFAULT_VALUE_CLASS};

/// Id of the generic heuristic strategy, used for unknown ids as well.
pub const AUTO_STRATEGY: &str = "auto";

/// Signature shared by every extraction strategy.
pub type Strategy = Box<dyn Fn(&Html, &SiteConfig) -> PriceMap + Send + Sync>;

pub struct StrategyRegistry {
    strategies: HashMap<String, Strategy>,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl StrategyRegistry {
    /// An empty registry. [`StrategyRegistry::extract`] on an empty registry
    /// always yields an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// A registry holding every built-in strategy.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(AUTO_STRATEGY, |doc, site| {
            let value_class = site.hints.value_class.as_deref().unwrap_or(DEFAULT_VALUE_CLASS);
            extract_auto(doc, value_class)
        });
        registry.register("table", formats::table::extract_table_or_cards);
        registry.register("card_list", formats::card_list::extract_card_list);
        registry.register("item_box", formats::item_box::extract_item_box);
        registry.register("yagi_table", |doc, _| formats::yagi::extract_yagi_table(doc));
        registry.register("kaneda_figcaption", |doc, _| {
            formats::kaneda::extract_kaneda_figcaption(doc)
        });
        registry.register("touki_dl", |doc, _| formats::touki::extract_touki_dl(doc));
        registry.register("kousyo_box", |doc, _| formats::kousyo::extract_kousyo_box(doc));
        registry.register("houyama_dl", |doc, _| formats::houyama::extract_houyama_dl(doc));
        registry.register("haruhi_table", |doc, _| {
            formats::haruhi::extract_haruhi_table(doc)
        });
        registry.register("touhoku_div", |doc, _| {
            formats::touhoku::extract_touhoku_div(doc)
        });
        registry
    }

    /// Registers `strategy` under `id`, replacing any previous entry.
    pub fn register<F>(&mut self, id: impl Into<String>, strategy: F)
    where
        F: Fn(&Html, &SiteConfig) -> PriceMap + Send + Sync + 'static,
    {
        self.strategies.insert(id.into(), Box::new(strategy));
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.strategies.contains_key(id)
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// The id that will actually run for `site`: its resolved strategy id if
    /// registered, `auto` otherwise.
    #[must_use]
    pub fn effective_id(&self, site: &SiteConfig) -> String {
        let id = site.strategy_id();
        if self.contains(&id) {
            id.into_owned()
        } else {
            AUTO_STRATEGY.to_string()
        }
    }

    /// Runs the strategy selected for `site` on a parsed document.
    pub fn extract(&self, doc: &Html, site: &SiteConfig) -> PriceMap {
        let id = site.strategy_id();
        let strategy = match self.strategies.get(id.as_ref()) {
            Some(strategy) => strategy,
            None => {
                tracing::warn!(
                    site = %site.name,
                    strategy = %id,
                    "unknown extraction strategy; using auto"
                );
                match self.strategies.get(AUTO_STRATEGY) {
                    Some(auto) => auto,
                    None => return PriceMap::new(),
                }
            }
        };
        let prices = strategy(doc, site);
        tracing::debug!(site = %site.name, strategy = %id, count = prices.len(), "extracted");
        prices
    }

    /// Parses `body` and runs the strategy selected for `site`.
    ///
    /// The parsed document lives only for the duration of this call.
    pub fn extract_html(&self, body: &str, site: &SiteConfig) -> PriceMap {
        let doc = Html::parse_document(body);
        self.extract(&doc, site)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
