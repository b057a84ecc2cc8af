//! Two-row tables: materials across the first row, prices in the cells
//! below them (usually wrapped in `<h3>`).

use std::sync::LazyLock;

use metalprice_core::PriceMap;
use scraper::{ElementRef, Html, Selector};

use crate::extract::dom::first;
use crate::text::{clean_price, is_price, text_of};

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td, th").expect("valid selector"));
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3").expect("valid selector"));

/// Columns read per table.
const COLUMNS: usize = 2;

pub(in crate::extract) fn extract_yagi_table(doc: &Html) -> PriceMap {
    let mut prices = PriceMap::new();
    for table in doc.select(&TABLE) {
        let mut rows = table.select(&ROW);
        let (Some(names), Some(values)) = (rows.next(), rows.next()) else {
            continue;
        };
        let names: Vec<ElementRef<'_>> = names.select(&CELL).take(COLUMNS).collect();
        let values: Vec<ElementRef<'_>> = values.select(&CELL).take(COLUMNS).collect();

        for (name_cell, value_cell) in names.into_iter().zip(values) {
            let material = text_of(name_cell);
            let price_text = first(value_cell, &HEADING).map_or_else(|| text_of(value_cell), text_of);
            if !material.is_empty() && is_price(&price_text) {
                prices.insert(material, clean_price(&price_text));
            }
        }
    }
    prices
}
