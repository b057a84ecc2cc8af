//! `ul.priceList` items: `<h4>` material, tax-included amount in
//! `p.price span`, otherwise the amount in `p.price strong`.

use std::sync::LazyLock;

use metalprice_core::PriceMap;
use scraper::{Html, Selector};

use crate::extract::dom::{first, select_class_containing};
use crate::price::first_amount;
use crate::text::text_of;

static UL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul").expect("valid selector"));
static LI: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").expect("valid selector"));
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h4").expect("valid selector"));
static PRICE_P: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.price").expect("valid selector"));
static SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("valid selector"));
static STRONG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong").expect("valid selector"));

pub(in crate::extract) fn extract_houyama_dl(doc: &Html) -> PriceMap {
    let mut prices = PriceMap::new();
    for list in select_class_containing(doc, &UL, "priceList") {
        for item in list.select(&LI) {
            let Some(heading) = first(item, &HEADING) else {
                continue;
            };
            let material = text_of(heading);
            let Some(price_p) = first(item, &PRICE_P) else {
                continue;
            };
            if material.is_empty() {
                continue;
            }

            let tax_included = first(price_p, &SPAN).map(text_of);
            let amount = tax_included
                .as_deref()
                .and_then(first_amount)
                .map(str::to_string)
                .or_else(|| {
                    first(price_p, &STRONG)
                        .map(text_of)
                        .as_deref()
                        .and_then(first_amount)
                        .map(str::to_string)
                });
            if let Some(amount) = amount {
                prices.insert(material, format!("{amount}円"));
            }
        }
    }
    prices
}
