//! `div.box4` panels: `<h4>` material, `p.price span.num` amount per kg.
//! Short extra text in the price paragraph (grade, condition) is appended to
//! the material as `(context)`.

use std::sync::LazyLock;

use metalprice_core::PriceMap;
use scraper::{Html, Selector};

use crate::extract::dom::{first, select_class_containing};
use crate::price::{first_amount, format_whole, is_range, max_amount};
use crate::text::text_of;

static DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").expect("valid selector"));
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h4").expect("valid selector"));
static PRICE_P: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.price").expect("valid selector"));
static NUM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.num").expect("valid selector"));

/// Price paragraphs at least this long are prose, not context.
const MAX_CONTEXT_CHARS: usize = 50;

pub(in crate::extract) fn extract_haruhi_table(doc: &Html) -> PriceMap {
    let mut prices = PriceMap::new();
    for panel in select_class_containing(doc, &DIV, "box4") {
        let Some(heading) = first(panel, &HEADING) else {
            continue;
        };
        let material = text_of(heading);

        for price_p in panel.select(&PRICE_P) {
            let Some(num) = first(price_p, &NUM) else {
                continue;
            };
            let num_text = text_of(num);
            let amount = if is_range(&num_text) {
                max_amount(&num_text).map(format_whole)
            } else {
                first_amount(&num_text).map(str::to_string)
            };
            let Some(amount) = amount else {
                continue;
            };

            if !material.is_empty() {
                let context = text_of(price_p);
                let key = if context.chars().count() > num_text.chars().count()
                    && context.chars().count() < MAX_CONTEXT_CHARS
                {
                    format!("{material} ({})", context.replace(&num_text, "").trim())
                } else {
                    material.clone()
                };
                prices.insert(key, format!("{amount}円/kg"));
            }
            break;
        }
    }
    prices
}
