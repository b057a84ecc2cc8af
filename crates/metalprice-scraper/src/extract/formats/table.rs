//! Row-oriented price tables.

use std::sync::LazyLock;

use metalprice_core::{PriceMap, SiteConfig};
use scraper::{ElementRef, Html, Selector};

use super::card_list::extract_card_list;
use crate::extract::dom::hint_selector;
use crate::text::{clean_price, is_price, text_of};

static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td, th").expect("valid selector"));

const DEFAULT_TABLE_SELECTOR: &str = "table";

/// Rows of every table matched by the site's `table_selectors`
/// (default `table`). Falls back to the card-list layout when no row
/// qualifies.
pub(in crate::extract) fn extract_table_or_cards(doc: &Html, site: &SiteConfig) -> PriceMap {
    let prices = extract_table(doc, site);
    if !prices.is_empty() {
        return prices;
    }
    tracing::debug!(site = %site.name, "no table rows with prices; trying card list");
    extract_card_list(doc, site)
}

pub(in crate::extract) fn extract_table(doc: &Html, site: &SiteConfig) -> PriceMap {
    let selectors: Vec<&str> = if site.hints.table_selectors.is_empty() {
        vec![DEFAULT_TABLE_SELECTOR]
    } else {
        site.hints.table_selectors.iter().map(String::as_str).collect()
    };

    let mut prices = PriceMap::new();
    for css in selectors {
        let Some(selector) = hint_selector(css) else {
            continue;
        };
        prices.extend(extract_rows(doc.select(&selector)));
    }
    prices
}

/// Pairs the first two cells of each row: material, then price when the
/// second cell reads as one.
pub(in crate::extract) fn extract_rows<'a>(
    tables: impl IntoIterator<Item = ElementRef<'a>>,
) -> PriceMap {
    let mut prices = PriceMap::new();
    for table in tables {
        for row in table.select(&ROW) {
            let mut cells = row.select(&CELL);
            let (Some(material_cell), Some(price_cell)) = (cells.next(), cells.next()) else {
                continue;
            };
            let material = text_of(material_cell);
            let price_text = text_of(price_cell);
            if !material.is_empty() && is_price(&price_text) {
                prices.insert(material, clean_price(&price_text));
            }
        }
    }
    prices
}
