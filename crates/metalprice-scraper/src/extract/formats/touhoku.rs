//! `div.box` cards: `<h4>` material with an optional `<small>` note,
//! `p.price` amount with its unit in `<small>`. Ranges report the maximum.

use std::sync::LazyLock;

use metalprice_core::PriceMap;
use scraper::{Html, Selector};

use crate::extract::dom::first;
use crate::price::{first_amount, format_whole, is_range, max_amount};
use crate::text::{text_excluding, text_of};

static BOX: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.box").expect("valid selector"));
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h4").expect("valid selector"));
static PRICE_P: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.price").expect("valid selector"));
static SMALL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("small").expect("valid selector"));

pub(in crate::extract) fn extract_touhoku_div(doc: &Html) -> PriceMap {
    let mut prices = PriceMap::new();
    for card in doc.select(&BOX) {
        let Some(heading) = first(card, &HEADING) else {
            continue;
        };
        let mut material = text_excluding(heading, "small");
        if let Some(note) = first(heading, &SMALL).map(text_of).filter(|n| !n.is_empty()) {
            material = format!("{material} ({note})");
        }
        let Some(price_p) = first(card, &PRICE_P) else {
            continue;
        };

        let unit = first(price_p, &SMALL).map(text_of).unwrap_or_default();
        let unit = if unit.is_empty() { "円" } else { unit.as_str() };
        let value = text_excluding(price_p, "small");
        let amount = if is_range(&value) {
            max_amount(&value).map(format_whole)
        } else {
            first_amount(&value).map(str::to_string)
        };

        if let Some(amount) = amount {
            if !material.is_empty() {
                prices.insert(material, format!("{amount}{unit}"));
            }
        }
    }
    prices
}
